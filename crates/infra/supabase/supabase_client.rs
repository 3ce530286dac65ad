use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{StatusCode, header::AUTHORIZATION};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, warn};
use url::Url;

use crate::domain::{
    entities::plans::{PlanEntity, PlanListing},
    repositories::{
        auth_provider::{AuthProvider, AuthProviderError},
        checkout::CheckoutGateway,
        plans::PlanCatalog,
    },
    value_objects::{
        checkout::{CheckoutSessionModel, CreateCheckoutModel},
        iam::{AuthProviderUser, AuthSession, SignUpModel},
    },
};

const API_KEY_HEADER: &str = "apikey";
const CUSTOMER_EMAIL_HEADER: &str = "X-Customer-Email";
const BODY_PREVIEW_LIMIT: usize = 512;

#[derive(Debug, Clone)]
pub struct SupabaseClientConfig {
    pub project_url: String,
    pub anon_key: String,
    pub plans_function: String,
    pub checkout_function: String,
    pub request_timeout_secs: u64,
}

/// Thin reqwest client over Supabase Auth (GoTrue) and Edge Functions.
pub struct SupabaseClient {
    http: reqwest::Client,
    project_url: Url,
    anon_key: String,
    plans_function: String,
    checkout_function: String,
}

/// GoTrue has used several error shapes over time; take whichever message is present.
#[derive(Debug, Default, Deserialize)]
struct SupabaseErrorEnvelope {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
    error_code: Option<String>,
}

impl SupabaseErrorEnvelope {
    fn into_message(self) -> Option<String> {
        self.msg
            .or(self.message)
            .or(self.error_description)
            .or(self.error)
            .filter(|message| !message.trim().is_empty())
    }
}

struct FailedResponse {
    status: StatusCode,
    message: Option<String>,
}

impl SupabaseClient {
    pub fn new(config: SupabaseClientConfig) -> Result<Self> {
        let mut project_url = Url::parse(&config.project_url)
            .with_context(|| format!("invalid Supabase project url: {}", config.project_url))?;
        if !project_url.path().ends_with('/') {
            let path = format!("{}/", project_url.path());
            project_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("failed to build Supabase http client")?;

        Ok(Self {
            http,
            project_url,
            anon_key: config.anon_key,
            plans_function: config.plans_function,
            checkout_function: config.checkout_function,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.project_url
            .join(path)
            .with_context(|| format!("failed to build Supabase url for {path}"))
    }

    fn function_endpoint(&self, name: &str) -> Result<Url> {
        self.endpoint(&format!("functions/v1/{}", name.trim_matches('/')))
    }

    fn bearer(token: &str) -> String {
        format!("Bearer {}", token)
    }

    /// Reads a non-success response, logs it, and extracts the provider's message.
    async fn read_failure(resp: reqwest::Response, context: &str) -> FailedResponse {
        let status = resp.status();
        let body = match resp.text().await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => "<empty response body>".to_string(),
            Err(err) => format!("<failed to read response body: {err}>"),
        };

        let envelope = serde_json::from_str::<SupabaseErrorEnvelope>(&body).unwrap_or_default();
        let error_code = envelope.error_code.clone();
        let message = envelope.into_message();
        let preview = body.chars().take(BODY_PREVIEW_LIMIT).collect::<String>();

        if status.is_server_error() {
            error!(
                status = %status,
                supabase_error_code = ?error_code,
                supabase_message = ?message,
                response_body = %preview,
                context = %context,
                "supabase: request failed"
            );
        } else {
            warn!(
                status = %status,
                supabase_error_code = ?error_code,
                supabase_message = ?message,
                context = %context,
                "supabase: request rejected"
            );
        }

        FailedResponse { status, message }
    }

    async fn ensure_success(resp: reqwest::Response, context: &str) -> Result<reqwest::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }

        let failure = Self::read_failure(resp, context).await;
        anyhow::bail!(
            "Supabase request failed: {} (status {}, message={:?})",
            context,
            failure.status,
            failure.message
        );
    }

    async fn into_auth_error(resp: reqwest::Response, context: &str) -> AuthProviderError {
        let failure = Self::read_failure(resp, context).await;
        auth_error_from(failure, context)
    }
}

/// Client errors carry a message meant for the user; everything else is an outage.
fn auth_error_from(failure: FailedResponse, context: &str) -> AuthProviderError {
    if failure.status.is_client_error() {
        AuthProviderError::Rejected(
            failure
                .message
                .unwrap_or_else(|| "Request was rejected".to_string()),
        )
    } else {
        AuthProviderError::Unavailable(anyhow::anyhow!(
            "Supabase auth request failed: {} (status {})",
            context,
            failure.status
        ))
    }
}

#[async_trait]
impl AuthProvider for SupabaseClient {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> std::result::Result<AuthSession, AuthProviderError> {
        let mut url = self.endpoint("auth/v1/token")?;
        url.query_pairs_mut().append_pair("grant_type", "password");

        let resp = self
            .http
            .post(url)
            .header(API_KEY_HEADER, &self.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .context("failed to reach Supabase auth")?;

        if !resp.status().is_success() {
            return Err(Self::into_auth_error(resp, "sign in with password").await);
        }

        let session = resp
            .json::<AuthSession>()
            .await
            .context("failed to decode Supabase session")?;
        Ok(session)
    }

    async fn sign_up(
        &self,
        sign_up_model: SignUpModel,
    ) -> std::result::Result<AuthProviderUser, AuthProviderError> {
        let url = self.endpoint("auth/v1/signup")?;

        let resp = self
            .http
            .post(url)
            .header(API_KEY_HEADER, &self.anon_key)
            .json(&json!({
                "email": sign_up_model.email,
                "password": sign_up_model.password,
                "data": { "full_name": sign_up_model.full_name },
            }))
            .send()
            .await
            .context("failed to reach Supabase auth")?;

        if !resp.status().is_success() {
            return Err(Self::into_auth_error(resp, "sign up").await);
        }

        // With email confirmation on, GoTrue returns the bare user; otherwise a session.
        let body = resp
            .json::<serde_json::Value>()
            .await
            .context("failed to decode Supabase sign up response")?;
        let user = body.get("user").cloned().unwrap_or(body);
        let user = serde_json::from_value::<AuthProviderUser>(user)
            .context("Supabase sign up response has no user")?;
        Ok(user)
    }

    async fn sign_out(&self, access_token: &str) -> Result<()> {
        let url = self.endpoint("auth/v1/logout")?;

        let resp = self
            .http
            .post(url)
            .header(API_KEY_HEADER, &self.anon_key)
            .header(AUTHORIZATION, Self::bearer(access_token))
            .send()
            .await
            .context("failed to reach Supabase auth")?;

        Self::ensure_success(resp, "sign out").await?;
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthProviderUser> {
        let url = self.endpoint("auth/v1/user")?;

        let resp = self
            .http
            .get(url)
            .header(API_KEY_HEADER, &self.anon_key)
            .header(AUTHORIZATION, Self::bearer(access_token))
            .send()
            .await
            .context("failed to reach Supabase auth")?;

        let user = Self::ensure_success(resp, "get user")
            .await?
            .json::<AuthProviderUser>()
            .await
            .context("failed to decode Supabase user")?;
        Ok(user)
    }
}

#[async_trait]
impl PlanCatalog for SupabaseClient {
    async fn list_plans(&self) -> Result<Vec<PlanEntity>> {
        let url = self.function_endpoint(&self.plans_function)?;

        let resp = self
            .http
            .post(url)
            .header(API_KEY_HEADER, &self.anon_key)
            .header(AUTHORIZATION, Self::bearer(&self.anon_key))
            .json(&json!({}))
            .send()
            .await
            .context("failed to reach plan listing function")?;

        let listing = Self::ensure_success(resp, "list plans")
            .await?
            .json::<PlanListing>()
            .await
            .context("failed to decode plan listing")?;
        Ok(listing.items)
    }
}

#[async_trait]
impl CheckoutGateway for SupabaseClient {
    async fn create_checkout_session(
        &self,
        create_checkout_model: CreateCheckoutModel,
        access_token: &str,
    ) -> Result<CheckoutSessionModel> {
        let url = self.function_endpoint(&self.checkout_function)?;

        let resp = self
            .http
            .post(url)
            .header(API_KEY_HEADER, &self.anon_key)
            .header(AUTHORIZATION, Self::bearer(access_token))
            .header(CUSTOMER_EMAIL_HEADER, &create_checkout_model.customer_email)
            .json(&create_checkout_model)
            .send()
            .await
            .context("failed to reach checkout function")?;

        let session = Self::ensure_success(resp, "create checkout session")
            .await?
            .json::<CheckoutSessionModel>()
            .await
            .context("failed to decode checkout session")?;
        Ok(session)
    }
}
