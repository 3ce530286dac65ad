use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::value_objects::checkout::{CheckoutSessionModel, CreateCheckoutModel};

#[async_trait]
#[automock]
pub trait CheckoutGateway {
    async fn create_checkout_session(
        &self,
        create_checkout_model: CreateCheckoutModel,
        access_token: &str,
    ) -> Result<CheckoutSessionModel>;
}
