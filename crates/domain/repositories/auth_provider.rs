use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::value_objects::iam::{AuthProviderUser, AuthSession, SignUpModel};

/// Failure reported by the auth provider for a user-facing action.
#[derive(Debug, thiserror::Error)]
pub enum AuthProviderError {
    /// The provider rejected the request and said why (bad credentials, taken email, ...).
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Unavailable(#[from] anyhow::Error),
}

#[async_trait]
#[automock]
pub trait AuthProvider {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> std::result::Result<AuthSession, AuthProviderError>;

    async fn sign_up(
        &self,
        sign_up_model: SignUpModel,
    ) -> std::result::Result<AuthProviderUser, AuthProviderError>;

    async fn sign_out(&self, access_token: &str) -> Result<()>;

    async fn get_user(&self, access_token: &str) -> Result<AuthProviderUser>;
}
