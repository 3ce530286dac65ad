use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::get,
};
use crates::{
    domain::repositories::plans::PlanCatalog, infra::supabase::supabase_client::SupabaseClient,
};

use crate::{auth::AuthUser, usecases::plans::PlansUseCase};

pub fn routes(supabase_client: Arc<SupabaseClient>) -> Router {
    router(Arc::new(PlansUseCase::new(supabase_client)))
}

pub fn router<P>(usecase: Arc<PlansUseCase<P>>) -> Router
where
    P: PlanCatalog + Send + Sync + 'static,
{
    Router::new()
        .route("/landing", get(landing::<P>))
        .route("/plans", get(pricing::<P>))
        .with_state(usecase)
}

pub async fn landing<P>(
    State(usecase): State<Arc<PlansUseCase<P>>>,
    auth: Option<AuthUser>,
) -> impl IntoResponse
where
    P: PlanCatalog + Send + Sync + 'static,
{
    let signed_in_email = auth.and_then(|auth| auth.email);
    Json(usecase.landing(signed_in_email).await)
}

pub async fn pricing<P>(State(usecase): State<Arc<PlansUseCase<P>>>) -> impl IntoResponse
where
    P: PlanCatalog + Send + Sync + 'static,
{
    Json(usecase.pricing().await)
}
