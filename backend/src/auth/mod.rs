use std::sync::Arc;

use axum::{
    Json, async_trait,
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use crates::domain::value_objects::iam::{AuthSession, SessionUser};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};
use uuid::Uuid;

pub const ACCESS_TOKEN_COOKIE: &str = "sb-access-token";
pub const REFRESH_TOKEN_COOKIE: &str = "sb-refresh-token";
pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Serialize, Deserialize)]
pub struct SupabaseClaims {
    pub sub: String,
    pub aud: String,
    pub role: String,
    pub email: Option<String>,
    pub exp: usize,
}

/// Verifies Supabase-issued access tokens with the project's JWT secret.
#[derive(Clone)]
pub struct SessionVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionVerifier {
    pub fn new(jwt_secret: &str) -> Self {
        let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
        validation.set_audience(&["authenticated"]);

        Self {
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<SupabaseClaims, AuthError> {
        let token_data = decode::<SupabaseClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        Ok(token_data.claims)
    }
}

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub access_token: String,
}

impl AuthUser {
    pub fn session_user(&self) -> SessionUser {
        SessionUser {
            user_id: self.user_id,
            email: self.email.clone(),
            access_token: self.access_token.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing session")]
    MissingToken,
    #[error("Invalid Authorization header format")]
    InvalidHeader,
    #[error("JWT validation failed: {0}")]
    InvalidToken(String),
    #[error("Invalid user ID in token")]
    InvalidSubject,
    #[error("Session verifier is not configured")]
    Misconfigured,
}

#[derive(Debug, Serialize)]
struct AuthErrorBody {
    code: u16,
    message: String,
    redirect_to: &'static str,
}

// Tell axum how to convert `AuthError` into a response.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match self {
            AuthError::Misconfigured => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        };
        let message = match self {
            AuthError::Misconfigured => "Internal server error".to_string(),
            _ => "Please sign in to continue".to_string(),
        };

        (
            status,
            Json(AuthErrorBody {
                code: status.as_u16(),
                message,
                redirect_to: LOGIN_PATH,
            }),
        )
            .into_response()
    }
}

/// Bearer header first, then the session cookie set at sign-in.
fn extract_token(parts: &Parts) -> Result<String, AuthError> {
    if let Some(header) = parts.headers.get(AUTHORIZATION) {
        let value = header.to_str().map_err(|_| AuthError::InvalidHeader)?;
        let token = value
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidHeader)?;
        return Ok(token.trim().to_string());
    }

    CookieJar::from_headers(&parts.headers)
        .get(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingToken)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let verifier = parts
            .extensions
            .get::<Arc<SessionVerifier>>()
            .cloned()
            .ok_or_else(|| {
                error!("auth: session verifier extension missing");
                AuthError::Misconfigured
            })?;

        let token = extract_token(parts)?;

        let claims = verifier.verify(&token).map_err(|err| {
            debug!(error = %err, "auth: rejected session token");
            err
        })?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidSubject)?;

        Ok(AuthUser {
            user_id,
            email: claims.email,
            access_token: token,
        })
    }
}

fn session_cookie(name: &'static str, value: String, max_age_secs: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(cookie::time::Duration::seconds(max_age_secs))
        .build()
}

pub fn with_session_cookies(jar: CookieJar, session: &AuthSession, secure: bool) -> CookieJar {
    let jar = jar.add(session_cookie(
        ACCESS_TOKEN_COOKIE,
        session.access_token.clone(),
        session.expires_in,
        secure,
    ));

    match session.refresh_token.as_ref() {
        // Refresh tokens outlive the access token; keep them for a month.
        Some(refresh_token) => jar.add(session_cookie(
            REFRESH_TOKEN_COOKIE,
            refresh_token.clone(),
            60 * 60 * 24 * 30,
            secure,
        )),
        None => jar,
    }
}

pub fn without_session_cookies(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(ACCESS_TOKEN_COOKIE).path("/"))
        .remove(Cookie::build(REFRESH_TOKEN_COOKIE).path("/"))
}
