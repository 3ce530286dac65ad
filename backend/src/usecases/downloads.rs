use std::sync::Arc;

use axum::http::StatusCode;
use crates::domain::{
    repositories::subscriptions::SubscriptionRepository,
    value_objects::{
        iam::SessionUser,
        navigation::{NavigationDto, Toast},
    },
};
use tracing::info;

use super::subscriptions::SubscriptionStatusUseCase;

pub const SUBSCRIPTION_REQUIRED: &str =
    "You need an active subscription to download the desktop app.";

pub struct DownloadsUseCase<S>
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    subscription_status: Arc<SubscriptionStatusUseCase<S>>,
    download_url: Option<String>,
}

impl<S> DownloadsUseCase<S>
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    pub fn new(
        subscription_status: Arc<SubscriptionStatusUseCase<S>>,
        download_url: Option<String>,
    ) -> Self {
        Self {
            subscription_status,
            download_url,
        }
    }

    /// Gate order: signed in, then active subscription.
    pub async fn desktop_download(&self, user: Option<SessionUser>) -> (StatusCode, NavigationDto) {
        let Some(user) = user else {
            return (
                StatusCode::OK,
                NavigationDto::redirect(
                    "/login",
                    Some(Toast::info(
                        "Authentication required",
                        "Please sign in to download the desktop app.",
                    )),
                ),
            );
        };

        if !self
            .subscription_status
            .has_active_subscription(user.user_id)
            .await
        {
            info!(user_id = %user.user_id, "downloads: download blocked without active subscription");
            return (
                StatusCode::FORBIDDEN,
                NavigationDto::stay(
                    SUBSCRIPTION_REQUIRED,
                    Some(Toast::destructive("Subscription required", SUBSCRIPTION_REQUIRED)),
                ),
            );
        }

        info!(user_id = %user.user_id, "downloads: desktop app download started");
        let toast = Toast::info("Download started", "Your download should begin shortly.");
        let navigation = match self.download_url.as_ref() {
            Some(url) => NavigationDto::redirect(url.clone(), Some(toast)),
            None => NavigationDto::notify(toast),
        };

        (StatusCode::OK, navigation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::subscriptions::tests::repo_returning;
    use crates::domain::repositories::subscriptions::MockSubscriptionRepository;
    use uuid::Uuid;

    fn user(user_id: Uuid) -> SessionUser {
        SessionUser {
            user_id,
            email: None,
            access_token: "access".to_string(),
        }
    }

    fn usecase(repo: MockSubscriptionRepository, url: Option<&str>) -> DownloadsUseCase<MockSubscriptionRepository> {
        DownloadsUseCase::new(
            Arc::new(SubscriptionStatusUseCase::new(Arc::new(repo))),
            url.map(str::to_string),
        )
    }

    #[tokio::test]
    async fn anonymous_user_is_sent_to_login() {
        let mut repo = MockSubscriptionRepository::new();
        repo.expect_find_latest_by_user_id().never();

        let (status, navigation) = usecase(repo, None).desktop_download(None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(navigation.redirect_to.as_deref(), Some("/login"));
    }

    #[tokio::test]
    async fn inactive_subscription_is_forbidden() {
        let user_id = Uuid::new_v4();
        let (status, navigation) = usecase(repo_returning(user_id, Some("canceled")), None)
            .desktop_download(Some(user(user_id)))
            .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(navigation.error.as_deref(), Some(SUBSCRIPTION_REQUIRED));
        assert!(navigation.redirect_to.is_none());
    }

    #[tokio::test]
    async fn active_subscription_redirects_to_installer() {
        let user_id = Uuid::new_v4();
        let (status, navigation) = usecase(
            repo_returning(user_id, Some("active")),
            Some("https://downloads.example/MetaGen-Setup.exe"),
        )
        .desktop_download(Some(user(user_id)))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            navigation.redirect_to.as_deref(),
            Some("https://downloads.example/MetaGen-Setup.exe")
        );
    }

    #[tokio::test]
    async fn active_subscription_without_installer_only_notifies() {
        let user_id = Uuid::new_v4();
        let (_, navigation) = usecase(repo_returning(user_id, Some("active")), None)
            .desktop_download(Some(user(user_id)))
            .await;

        assert!(navigation.redirect_to.is_none());
        assert_eq!(navigation.toast.unwrap().title, "Download started");
    }
}
