use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
};
use crates::{
    domain::repositories::subscriptions::SubscriptionRepository,
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::subscriptions::SubscriptionPostgres,
    },
};

use crate::{
    auth::AuthUser,
    usecases::{downloads::DownloadsUseCase, subscriptions::SubscriptionStatusUseCase},
};

pub fn routes(db_pool: Arc<PgPoolSquad>, download_url: Option<String>) -> Router {
    let subscription_repo = SubscriptionPostgres::new(db_pool);
    let subscription_status = SubscriptionStatusUseCase::new(Arc::new(subscription_repo));

    router(Arc::new(DownloadsUseCase::new(
        Arc::new(subscription_status),
        download_url,
    )))
}

pub fn router<S>(usecase: Arc<DownloadsUseCase<S>>) -> Router
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/desktop", get(desktop_download::<S>))
        .with_state(usecase)
}

pub async fn desktop_download<S>(
    State(usecase): State<Arc<DownloadsUseCase<S>>>,
    auth: Option<AuthUser>,
) -> Response
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    let (status, navigation) = usecase
        .desktop_download(auth.map(|auth| auth.session_user()))
        .await;

    (status, Json(navigation)).into_response()
}
