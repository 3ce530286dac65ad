use std::sync::Arc;

use crates::domain::{
    repositories::subscriptions::SubscriptionRepository,
    value_objects::guides::{ApiKeysDto, GuideDto, example_api_keys, metadata_guide},
};
use uuid::Uuid;

use super::subscriptions::SubscriptionStatusUseCase;

pub struct GuidesUseCase<S>
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    subscription_status: Arc<SubscriptionStatusUseCase<S>>,
}

impl<S> GuidesUseCase<S>
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    pub fn new(subscription_status: Arc<SubscriptionStatusUseCase<S>>) -> Self {
        Self { subscription_status }
    }

    pub fn guide(&self) -> GuideDto {
        metadata_guide()
    }

    pub async fn api_keys(&self, user_id: Uuid) -> ApiKeysDto {
        let active = self
            .subscription_status
            .has_active_subscription(user_id)
            .await;
        example_api_keys(active)
    }
}
