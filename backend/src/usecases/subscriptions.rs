use std::sync::Arc;

use crates::domain::{
    entities::subscriptions::SubscriptionEntity,
    repositories::subscriptions::SubscriptionRepository,
    value_objects::enums::subscription_statuses::SubscriptionStatus,
};
use tracing::{error, info};
use uuid::Uuid;

/// Read-only view over the subscriptions row store.
pub struct SubscriptionStatusUseCase<S>
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    subscription_repo: Arc<S>,
}

impl<S> SubscriptionStatusUseCase<S>
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    pub fn new(subscription_repo: Arc<S>) -> Self {
        Self { subscription_repo }
    }

    /// A failed query reads as "no subscription".
    pub async fn latest_subscription(&self, user_id: Uuid) -> Option<SubscriptionEntity> {
        match self.subscription_repo.find_latest_by_user_id(user_id).await {
            Ok(Some(subscription)) => {
                info!(
                    %user_id,
                    status = %subscription.status,
                    "subscriptions: latest subscription loaded"
                );
                Some(subscription)
            }
            Ok(None) => {
                info!(%user_id, "subscriptions: no subscription on record");
                None
            }
            Err(err) => {
                error!(
                    %user_id,
                    db_error = ?err,
                    "subscriptions: failed to load latest subscription"
                );
                None
            }
        }
    }

    pub async fn has_active_subscription(&self, user_id: Uuid) -> bool {
        self.latest_subscription(user_id)
            .await
            .map(|subscription| SubscriptionStatus::from_str(&subscription.status).is_active())
            .unwrap_or(false)
    }
}
