use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::subscriptions::SubscriptionEntity;

#[async_trait]
#[automock]
pub trait SubscriptionRepository {
    /// Most recently created subscription row for the user, whatever its status.
    async fn find_latest_by_user_id(&self, user_id: Uuid) -> Result<Option<SubscriptionEntity>>;
}
