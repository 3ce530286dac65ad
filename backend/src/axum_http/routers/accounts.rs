use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
    routing::post,
};
use axum_extra::extract::cookie::CookieJar;
use crates::{
    domain::{
        repositories::auth_provider::AuthProvider,
        value_objects::{
            iam::{SignInModel, SignUpModel},
            navigation::NavigationDto,
        },
    },
    infra::supabase::supabase_client::SupabaseClient,
};

use crate::{
    auth::{AuthUser, with_session_cookies, without_session_cookies},
    axum_http::error_responses::{AppError, navigation_failure},
    config::stage::Stage,
    usecases::accounts::AccountUseCase,
};

pub fn routes(supabase_client: Arc<SupabaseClient>, stage: Stage) -> Router {
    router(Arc::new(AccountUseCase::new(supabase_client)), stage)
}

pub fn router<A>(usecase: Arc<AccountUseCase<A>>, stage: Stage) -> Router
where
    A: AuthProvider + Send + Sync + 'static,
{
    Router::new()
        .route("/sign-in", post(sign_in::<A>))
        .route("/sign-up", post(sign_up::<A>))
        .route("/sign-out", post(sign_out::<A>))
        .layer(Extension(stage))
        .with_state(usecase)
}

pub async fn sign_in<A>(
    State(usecase): State<Arc<AccountUseCase<A>>>,
    Extension(stage): Extension<Stage>,
    jar: CookieJar,
    payload: Result<Json<SignInModel>, JsonRejection>,
) -> Response
where
    A: AuthProvider + Send + Sync + 'static,
{
    let Json(sign_in_model) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return AppError::from(rejection).into_response(),
    };

    match usecase.sign_in(sign_in_model).await {
        Ok(signed_in) => {
            let jar = with_session_cookies(jar, &signed_in.session, stage.secure_cookies());
            (jar, Json(signed_in.navigation)).into_response()
        }
        Err(err) => navigation_failure(
            err.status_code(),
            NavigationDto::stay(err.user_message(), None),
        ),
    }
}

pub async fn sign_up<A>(
    State(usecase): State<Arc<AccountUseCase<A>>>,
    payload: Result<Json<SignUpModel>, JsonRejection>,
) -> Response
where
    A: AuthProvider + Send + Sync + 'static,
{
    let Json(sign_up_model) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return AppError::from(rejection).into_response(),
    };

    match usecase.sign_up(sign_up_model).await {
        Ok(navigation) => Json(navigation).into_response(),
        Err(err) => navigation_failure(
            err.status_code(),
            NavigationDto::stay(err.user_message(), None),
        ),
    }
}

pub async fn sign_out<A>(
    State(usecase): State<Arc<AccountUseCase<A>>>,
    auth: Option<AuthUser>,
    jar: CookieJar,
) -> Response
where
    A: AuthProvider + Send + Sync + 'static,
{
    let navigation = usecase
        .sign_out(auth.as_ref().map(|auth| auth.access_token.as_str()))
        .await;

    (without_session_cookies(jar), Json(navigation)).into_response()
}
