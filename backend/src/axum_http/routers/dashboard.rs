use std::sync::Arc;

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use crates::{
    domain::repositories::{auth_provider::AuthProvider, subscriptions::SubscriptionRepository},
    infra::{
        db::{
            postgres::postgres_connection::PgPoolSquad,
            repositories::subscriptions::SubscriptionPostgres,
        },
        supabase::supabase_client::SupabaseClient,
    },
};

use crate::{
    auth::AuthUser,
    usecases::{dashboard::DashboardUseCase, subscriptions::SubscriptionStatusUseCase},
};

pub fn routes(db_pool: Arc<PgPoolSquad>, supabase_client: Arc<SupabaseClient>) -> Router {
    let subscription_repo = SubscriptionPostgres::new(db_pool);
    let subscription_status = SubscriptionStatusUseCase::new(Arc::new(subscription_repo));

    router(Arc::new(DashboardUseCase::new(
        Arc::new(subscription_status),
        supabase_client,
    )))
}

pub fn router<S, A>(usecase: Arc<DashboardUseCase<S, A>>) -> Router
where
    S: SubscriptionRepository + Send + Sync + 'static,
    A: AuthProvider + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(dashboard::<S, A>))
        .with_state(usecase)
}

pub async fn dashboard<S, A>(
    State(usecase): State<Arc<DashboardUseCase<S, A>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
    A: AuthProvider + Send + Sync + 'static,
{
    Json(usecase.dashboard(auth.session_user()).await)
}
