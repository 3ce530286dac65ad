use std::sync::Arc;

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use crates::{
    domain::repositories::subscriptions::SubscriptionRepository,
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::subscriptions::SubscriptionPostgres,
    },
};

use crate::{
    auth::AuthUser,
    usecases::{guides::GuidesUseCase, subscriptions::SubscriptionStatusUseCase},
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let subscription_repo = SubscriptionPostgres::new(db_pool);
    let subscription_status = SubscriptionStatusUseCase::new(Arc::new(subscription_repo));

    router(Arc::new(GuidesUseCase::new(Arc::new(subscription_status))))
}

pub fn router<S>(usecase: Arc<GuidesUseCase<S>>) -> Router
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/guide", get(guide::<S>))
        .route("/api-keys", get(api_keys::<S>))
        .with_state(usecase)
}

pub async fn guide<S>(State(usecase): State<Arc<GuidesUseCase<S>>>) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    Json(usecase.guide())
}

pub async fn api_keys<S>(
    State(usecase): State<Arc<GuidesUseCase<S>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    Json(usecase.api_keys(auth.user_id).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SessionVerifier;
    use axum::{
        Extension,
        body::Body,
        http::{Request, StatusCode},
    };
    use crates::domain::repositories::subscriptions::MockSubscriptionRepository;
    use tower::ServiceExt;

    fn app() -> Router {
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo.expect_find_latest_by_user_id().never();

        let usecase = GuidesUseCase::new(Arc::new(SubscriptionStatusUseCase::new(Arc::new(
            subscription_repo,
        ))));
        router(Arc::new(usecase)).layer(Extension(Arc::new(SessionVerifier::new("test-secret"))))
    }

    #[tokio::test]
    async fn guide_is_public() {
        let response = app()
            .oneshot(Request::get("/guide").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn api_keys_require_session() {
        let response = app()
            .oneshot(Request::get("/api-keys").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
