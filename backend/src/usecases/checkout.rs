use std::{collections::HashMap, sync::Arc};

use axum::http::StatusCode;
use crates::domain::{
    repositories::checkout::CheckoutGateway,
    value_objects::{
        checkout::CreateCheckoutModel,
        iam::SessionUser,
        navigation::{NavigationDto, Toast},
    },
};
use thiserror::Error;
use tracing::{error, info};

pub const CHECKOUT_LOGIN_REDIRECT: &str = "/login?redirect=pricing";
pub const CHECKOUT_FAILED: &str = "Failed to create checkout session. Please try again.";

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("price id is required")]
    MissingPrice,
    #[error("checkout session returned no url")]
    MissingUrl,
    #[error(transparent)]
    Gateway(#[from] anyhow::Error),
}

impl CheckoutError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CheckoutError::MissingPrice => StatusCode::BAD_REQUEST,
            CheckoutError::MissingUrl | CheckoutError::Gateway(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Every failure shows the same static text; details stay in the logs.
    pub fn navigation(&self) -> NavigationDto {
        NavigationDto::stay(
            CHECKOUT_FAILED,
            Some(Toast::destructive(
                "Checkout failed",
                "There was an error creating your checkout session. Please try again.",
            )),
        )
    }
}

pub type UseCaseResult<T> = std::result::Result<T, CheckoutError>;

pub struct CheckoutUseCase<G>
where
    G: CheckoutGateway + Send + Sync + 'static,
{
    checkout_gateway: Arc<G>,
    site_base_url: String,
}

impl<G> CheckoutUseCase<G>
where
    G: CheckoutGateway + Send + Sync + 'static,
{
    pub fn new(checkout_gateway: Arc<G>, site_base_url: String) -> Self {
        Self {
            checkout_gateway,
            site_base_url: site_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn create_checkout(
        &self,
        user: Option<SessionUser>,
        price_id: &str,
    ) -> UseCaseResult<NavigationDto> {
        let Some(user) = user else {
            info!("checkout: unauthenticated checkout attempt, redirecting to login");
            return Ok(NavigationDto::redirect(
                CHECKOUT_LOGIN_REDIRECT,
                Some(Toast::info(
                    "Authentication required",
                    "Please sign in to subscribe to a plan.",
                )),
            ));
        };

        let price_id = price_id.trim();
        if price_id.is_empty() {
            return Err(CheckoutError::MissingPrice);
        }

        let user_id = user.user_id;
        info!(%user_id, %price_id, "checkout: create checkout session requested");

        let customer_email = user.email.clone().unwrap_or_default();
        let create_checkout_model = CreateCheckoutModel {
            product_price_id: price_id.to_string(),
            success_url: format!("{}/dashboard", self.site_base_url),
            customer_email,
            metadata: HashMap::from([("user_id".to_string(), user_id.to_string())]),
        };

        let session = self
            .checkout_gateway
            .create_checkout_session(create_checkout_model, &user.access_token)
            .await
            .map_err(|err| {
                error!(%user_id, %price_id, error = ?err, "checkout: failed to create checkout session");
                CheckoutError::Gateway(err)
            })?;

        let url = session
            .url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                error!(%user_id, %price_id, "checkout: checkout session returned no url");
                CheckoutError::MissingUrl
            })?;

        info!(%user_id, %price_id, "checkout: redirecting to hosted checkout");

        Ok(NavigationDto::redirect(
            url,
            Some(Toast::info(
                "Redirecting to checkout",
                "You'll be redirected to complete your purchase.",
            )),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crates::domain::{
        repositories::checkout::MockCheckoutGateway, value_objects::checkout::CheckoutSessionModel,
    };
    use mockall::predicate::eq;
    use uuid::Uuid;

    fn user() -> SessionUser {
        SessionUser {
            user_id: Uuid::new_v4(),
            email: Some("ada@example.com".to_string()),
            access_token: "access".to_string(),
        }
    }

    #[tokio::test]
    async fn unauthenticated_checkout_redirects_without_network_call() {
        let mut checkout_gateway = MockCheckoutGateway::new();
        checkout_gateway.expect_create_checkout_session().never();

        let usecase = CheckoutUseCase::new(
            Arc::new(checkout_gateway),
            "https://metagen.example".to_string(),
        );
        let navigation = usecase.create_checkout(None, "price_1").await.unwrap();

        assert_eq!(
            navigation.redirect_to.as_deref(),
            Some(CHECKOUT_LOGIN_REDIRECT)
        );
        assert_eq!(navigation.toast.unwrap().title, "Authentication required");
    }

    #[tokio::test]
    async fn sends_price_email_and_user_metadata() {
        let user = user();
        let expected_user_id = user.user_id.to_string();

        let mut checkout_gateway = MockCheckoutGateway::new();
        checkout_gateway
            .expect_create_checkout_session()
            .withf(move |model, access_token| {
                model.product_price_id == "price_1"
                    && model.success_url == "https://metagen.example/dashboard"
                    && model.customer_email == "ada@example.com"
                    && model.metadata.get("user_id") == Some(&expected_user_id)
                    && access_token == "access"
            })
            .times(1)
            .returning(|_, _| {
                Box::pin(async move {
                    Ok(CheckoutSessionModel {
                        url: Some("https://checkout.example/s/1".to_string()),
                    })
                })
            });

        let usecase = CheckoutUseCase::new(
            Arc::new(checkout_gateway),
            "https://metagen.example/".to_string(),
        );
        let navigation = usecase.create_checkout(Some(user), " price_1 ").await.unwrap();

        assert_eq!(
            navigation.redirect_to.as_deref(),
            Some("https://checkout.example/s/1")
        );
        assert!(navigation.error.is_none());
    }

    #[tokio::test]
    async fn missing_url_is_a_failure() {
        let mut checkout_gateway = MockCheckoutGateway::new();
        checkout_gateway
            .expect_create_checkout_session()
            .returning(|_, _| Box::pin(async move { Ok(CheckoutSessionModel { url: None }) }));

        let usecase = CheckoutUseCase::new(Arc::new(checkout_gateway), "http://localhost".to_string());
        let err = usecase.create_checkout(Some(user()), "price_1").await.unwrap_err();

        assert!(matches!(err, CheckoutError::MissingUrl));
        let navigation = err.navigation();
        assert!(navigation.redirect_to.is_none());
        assert_eq!(navigation.error.as_deref(), Some(CHECKOUT_FAILED));
    }

    #[tokio::test]
    async fn gateway_failure_shows_static_message() {
        let mut checkout_gateway = MockCheckoutGateway::new();
        checkout_gateway
            .expect_create_checkout_session()
            .with(mockall::predicate::always(), eq("access"))
            .returning(|_, _| Box::pin(async move { Err(anyhow::anyhow!("500 from function")) }));

        let usecase = CheckoutUseCase::new(Arc::new(checkout_gateway), "http://localhost".to_string());
        let err = usecase.create_checkout(Some(user()), "price_1").await.unwrap_err();

        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.navigation().error.as_deref(), Some(CHECKOUT_FAILED));
    }

    #[tokio::test]
    async fn blank_price_is_rejected_before_network_call() {
        let mut checkout_gateway = MockCheckoutGateway::new();
        checkout_gateway.expect_create_checkout_session().never();

        let usecase = CheckoutUseCase::new(Arc::new(checkout_gateway), "http://localhost".to_string());
        let err = usecase.create_checkout(Some(user()), "  ").await.unwrap_err();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
