use std::sync::Arc;

use crates::domain::{
    repositories::{auth_provider::AuthProvider, subscriptions::SubscriptionRepository},
    value_objects::{
        iam::SessionUser,
        subscriptions::{DashboardDto, DesktopAppDto, SubscriptionPanelDto, UserProfileDto},
    },
};
use tracing::warn;

use super::subscriptions::SubscriptionStatusUseCase;

pub struct DashboardUseCase<S, A>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    A: AuthProvider + Send + Sync + 'static,
{
    subscription_status: Arc<SubscriptionStatusUseCase<S>>,
    auth_provider: Arc<A>,
}

impl<S, A> DashboardUseCase<S, A>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    A: AuthProvider + Send + Sync + 'static,
{
    pub fn new(subscription_status: Arc<SubscriptionStatusUseCase<S>>, auth_provider: Arc<A>) -> Self {
        Self {
            subscription_status,
            auth_provider,
        }
    }

    pub async fn dashboard(&self, user: SessionUser) -> DashboardDto {
        let latest = self
            .subscription_status
            .latest_subscription(user.user_id)
            .await;
        let subscription = SubscriptionPanelDto::from_latest(latest.as_ref());
        let desktop_app = DesktopAppDto::for_subscription(subscription.is_active());

        let profile = match self.auth_provider.get_user(&user.access_token).await {
            Ok(provider_user) => UserProfileDto::from_provider_user(&provider_user),
            Err(err) => {
                warn!(
                    user_id = %user.user_id,
                    error = ?err,
                    "dashboard: failed to load profile, using session identity"
                );
                UserProfileDto::from_email(user.email.as_deref())
            }
        };

        DashboardDto {
            subscription,
            desktop_app,
            profile,
        }
    }
}
