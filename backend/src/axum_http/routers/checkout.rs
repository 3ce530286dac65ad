use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
    routing::post,
};
use crates::{
    domain::{
        repositories::checkout::CheckoutGateway,
        value_objects::{checkout::CreateCheckoutRequest, navigation::NavigationDto},
    },
    infra::supabase::supabase_client::SupabaseClient,
};

use crate::{
    auth::AuthUser,
    axum_http::error_responses::{AppError, navigation_failure},
    usecases::checkout::{CheckoutUseCase, UseCaseResult},
};

pub fn routes(supabase_client: Arc<SupabaseClient>, site_base_url: String) -> Router {
    router(Arc::new(CheckoutUseCase::new(supabase_client, site_base_url)))
}

pub fn router<G>(usecase: Arc<CheckoutUseCase<G>>) -> Router
where
    G: CheckoutGateway + Send + Sync + 'static,
{
    Router::new()
        .route("/", post(create_checkout::<G>))
        .with_state(usecase)
}

pub async fn create_checkout<G>(
    State(usecase): State<Arc<CheckoutUseCase<G>>>,
    auth: Option<AuthUser>,
    payload: Result<Json<CreateCheckoutRequest>, JsonRejection>,
) -> Response
where
    G: CheckoutGateway + Send + Sync + 'static,
{
    // Anonymous callers go to login whatever the body holds.
    let Some(auth) = auth else {
        return checkout_response(usecase.create_checkout(None, "").await);
    };

    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return AppError::from(rejection).into_response(),
    };

    checkout_response(
        usecase
            .create_checkout(Some(auth.session_user()), &request.price_id)
            .await,
    )
}

fn checkout_response(result: UseCaseResult<NavigationDto>) -> Response {
    match result {
        Ok(navigation) => Json(navigation).into_response(),
        Err(err) => navigation_failure(err.status_code(), err.navigation()),
    }
}
