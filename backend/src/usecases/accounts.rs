use std::sync::Arc;

use axum::http::StatusCode;
use crates::domain::{
    repositories::auth_provider::{AuthProvider, AuthProviderError},
    value_objects::{
        iam::{AuthSession, SignInModel, SignUpModel},
        navigation::{NavigationDto, Toast},
    },
};
use thiserror::Error;
use tracing::{error, info, warn};

pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const AUTH_UNAVAILABLE: &str = "Unable to reach the sign-in service. Please try again.";

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("{0}")]
    MissingField(&'static str),
    /// Message comes straight from the auth provider.
    #[error("{0}")]
    Rejected(String),
    #[error("auth provider unavailable")]
    Unavailable(#[source] anyhow::Error),
}

impl AccountError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AccountError::MissingField(_) => StatusCode::BAD_REQUEST,
            AccountError::Rejected(_) => StatusCode::UNAUTHORIZED,
            AccountError::Unavailable(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            AccountError::Unavailable(_) => AUTH_UNAVAILABLE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<AuthProviderError> for AccountError {
    fn from(err: AuthProviderError) -> Self {
        match err {
            AuthProviderError::Rejected(message) if message.trim().is_empty() => {
                AccountError::Rejected(INVALID_CREDENTIALS.to_string())
            }
            AuthProviderError::Rejected(message) => AccountError::Rejected(message),
            AuthProviderError::Unavailable(err) => AccountError::Unavailable(err),
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, AccountError>;

#[derive(Debug)]
pub struct SignedIn {
    pub session: AuthSession,
    pub navigation: NavigationDto,
}

pub struct AccountUseCase<A>
where
    A: AuthProvider + Send + Sync + 'static,
{
    auth_provider: Arc<A>,
}

impl<A> AccountUseCase<A>
where
    A: AuthProvider + Send + Sync + 'static,
{
    pub fn new(auth_provider: Arc<A>) -> Self {
        Self { auth_provider }
    }

    pub async fn sign_in(&self, sign_in_model: SignInModel) -> UseCaseResult<SignedIn> {
        let email = sign_in_model.email.trim();
        if email.is_empty() || sign_in_model.password.is_empty() {
            return Err(AccountError::MissingField("Email and password are required"));
        }

        let session = self
            .auth_provider
            .sign_in_with_password(email, &sign_in_model.password)
            .await
            .map_err(|err| {
                let err = AccountError::from(err);
                match &err {
                    AccountError::Unavailable(source) => {
                        error!(error = ?source, "accounts: sign in failed upstream")
                    }
                    _ => info!(status = err.status_code().as_u16(), "accounts: sign in rejected"),
                }
                err
            })?;

        info!(user_id = %session.user.id, "accounts: sign in successful");

        Ok(SignedIn {
            session,
            navigation: NavigationDto::redirect(
                "/dashboard",
                Some(Toast::info(
                    "Welcome back",
                    "You have successfully signed in.",
                )),
            ),
        })
    }

    pub async fn sign_up(&self, sign_up_model: SignUpModel) -> UseCaseResult<NavigationDto> {
        if sign_up_model.email.trim().is_empty() || sign_up_model.password.is_empty() {
            return Err(AccountError::MissingField("Email and password are required"));
        }

        let sign_up_model = SignUpModel {
            email: sign_up_model.email.trim().to_string(),
            full_name: sign_up_model
                .full_name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
            ..sign_up_model
        };

        let user = self
            .auth_provider
            .sign_up(sign_up_model)
            .await
            .map_err(|err| {
                let err = AccountError::from(err);
                if let AccountError::Unavailable(source) = &err {
                    error!(error = ?source, "accounts: sign up failed upstream");
                }
                err
            })?;

        info!(user_id = %user.id, "accounts: account created");

        Ok(NavigationDto::redirect(
            "/login",
            Some(Toast::info(
                "Account created",
                "Please check your email to verify your account.",
            )),
        ))
    }

    /// Always ends the local session; revoking upstream is best effort.
    pub async fn sign_out(&self, access_token: Option<&str>) -> NavigationDto {
        if let Some(access_token) = access_token {
            if let Err(err) = self.auth_provider.sign_out(access_token).await {
                warn!(error = ?err, "accounts: failed to revoke session upstream");
            }
        }

        NavigationDto::redirect(
            "/",
            Some(Toast::info("Signed out", "You have been signed out.")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crates::domain::{
        repositories::auth_provider::MockAuthProvider,
        value_objects::iam::AuthProviderUser,
    };
    use mockall::predicate::eq;
    use uuid::Uuid;

    fn provider_user() -> AuthProviderUser {
        AuthProviderUser {
            id: Uuid::new_v4(),
            email: Some("ada@example.com".to_string()),
            user_metadata: serde_json::Value::Null,
            created_at: None,
            last_sign_in_at: None,
        }
    }

    fn session() -> AuthSession {
        AuthSession {
            access_token: "access".to_string(),
            refresh_token: Some("refresh".to_string()),
            expires_in: 3600,
            user: provider_user(),
        }
    }

    fn sign_in_model(password: &str) -> SignInModel {
        SignInModel {
            email: " ada@example.com ".to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn successful_sign_in_navigates_to_dashboard() {
        let mut auth_provider = MockAuthProvider::new();
        auth_provider
            .expect_sign_in_with_password()
            .with(eq("ada@example.com"), eq("correct horse"))
            .times(1)
            .returning(|_, _| Box::pin(async move { Ok(session()) }));

        let usecase = AccountUseCase::new(Arc::new(auth_provider));
        let signed_in = usecase.sign_in(sign_in_model("correct horse")).await.unwrap();

        assert_eq!(signed_in.navigation.redirect_to.as_deref(), Some("/dashboard"));
        assert_eq!(signed_in.navigation.toast.unwrap().title, "Welcome back");
        assert_eq!(signed_in.session.access_token, "access");
    }

    #[tokio::test]
    async fn invalid_credentials_surface_provider_message() {
        let mut auth_provider = MockAuthProvider::new();
        auth_provider
            .expect_sign_in_with_password()
            .returning(|_, _| {
                Box::pin(async move {
                    Err(AuthProviderError::Rejected(
                        "Invalid login credentials".to_string(),
                    ))
                })
            });

        let usecase = AccountUseCase::new(Arc::new(auth_provider));
        let err = usecase.sign_in(sign_in_model("wrong")).await.unwrap_err();

        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.user_message(), "Invalid login credentials");
    }

    #[tokio::test]
    async fn blank_rejection_falls_back_to_default_message() {
        let mut auth_provider = MockAuthProvider::new();
        auth_provider
            .expect_sign_in_with_password()
            .returning(|_, _| {
                Box::pin(async move { Err(AuthProviderError::Rejected(" ".to_string())) })
            });

        let usecase = AccountUseCase::new(Arc::new(auth_provider));
        let err = usecase.sign_in(sign_in_model("wrong")).await.unwrap_err();

        assert_eq!(err.user_message(), INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn provider_outage_hides_details() {
        let mut auth_provider = MockAuthProvider::new();
        auth_provider
            .expect_sign_in_with_password()
            .returning(|_, _| {
                Box::pin(async move {
                    Err(AuthProviderError::Unavailable(anyhow::anyhow!(
                        "connection refused"
                    )))
                })
            });

        let usecase = AccountUseCase::new(Arc::new(auth_provider));
        let err = usecase.sign_in(sign_in_model("pw")).await.unwrap_err();

        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.user_message(), AUTH_UNAVAILABLE);
    }

    #[tokio::test]
    async fn empty_password_skips_provider() {
        let mut auth_provider = MockAuthProvider::new();
        auth_provider.expect_sign_in_with_password().never();

        let usecase = AccountUseCase::new(Arc::new(auth_provider));
        let err = usecase.sign_in(sign_in_model("")).await.unwrap_err();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn sign_up_trims_input_and_navigates_to_login() {
        let mut auth_provider = MockAuthProvider::new();
        auth_provider
            .expect_sign_up()
            .withf(|model| model.email == "ada@example.com" && model.full_name.is_none())
            .times(1)
            .returning(|_| Box::pin(async move { Ok(provider_user()) }));

        let usecase = AccountUseCase::new(Arc::new(auth_provider));
        let navigation = usecase
            .sign_up(SignUpModel {
                email: "  ada@example.com".to_string(),
                password: "pw123456".to_string(),
                full_name: Some("   ".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(navigation.redirect_to.as_deref(), Some("/login"));
    }

    #[tokio::test]
    async fn sign_out_ignores_upstream_failure() {
        let mut auth_provider = MockAuthProvider::new();
        auth_provider
            .expect_sign_out()
            .with(eq("access"))
            .times(1)
            .returning(|_| Box::pin(async move { Err(anyhow::anyhow!("expired")) }));

        let usecase = AccountUseCase::new(Arc::new(auth_provider));
        let navigation = usecase.sign_out(Some("access")).await;

        assert_eq!(navigation.redirect_to.as_deref(), Some("/"));
    }
}
