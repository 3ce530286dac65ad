use crate::{
    auth::SessionVerifier,
    axum_http::{default_routers, routers},
    config::config_model::DotEnvyConfig,
};
use anyhow::{Context, Result};
use axum::{
    Extension, Router,
    http::{
        HeaderValue, Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::get,
};
use crates::infra::{
    db::postgres::postgres_connection::PgPoolSquad,
    supabase::supabase_client::{SupabaseClient, SupabaseClientConfig},
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer, limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use tracing::{error, info};

pub async fn start(config: Arc<DotEnvyConfig>, db_pool: Arc<PgPoolSquad>) -> Result<()> {
    let supabase_client = Arc::new(SupabaseClient::new(SupabaseClientConfig {
        project_url: config.supabase.project_url.clone(),
        anon_key: config.supabase.anon_key.clone(),
        plans_function: config.supabase.plans_function.clone(),
        checkout_function: config.supabase.checkout_function.clone(),
        request_timeout_secs: config.supabase.request_timeout,
    })?);
    let session_verifier = Arc::new(SessionVerifier::new(&config.supabase.jwt_secret));

    // Cookies ride along cross-origin, so the origin has to be explicit.
    let site_origin = HeaderValue::from_str(config.site.base_url.trim_end_matches('/'))
        .context("SITE_URL is not a valid origin")?;

    let app = Router::new()
        .fallback(default_routers::not_found)
        .nest(
            "/api/v1/auth",
            routers::accounts::routes(Arc::clone(&supabase_client), config.stage),
        )
        .nest(
            "/api/v1/site",
            routers::plans::routes(Arc::clone(&supabase_client)),
        )
        .nest(
            "/api/v1/checkout",
            routers::checkout::routes(Arc::clone(&supabase_client), config.site.base_url.clone()),
        )
        .nest(
            "/api/v1/dashboard",
            routers::dashboard::routes(Arc::clone(&db_pool), Arc::clone(&supabase_client)),
        )
        .nest(
            "/api/v1/downloads",
            routers::downloads::routes(
                Arc::clone(&db_pool),
                config.site.desktop_app_download_url.clone(),
            ),
        )
        .nest("/api/v1/docs", routers::guides::routes(Arc::clone(&db_pool)))
        .route("/api/v1/health-check", get(default_routers::health_check))
        .layer(Extension(session_verifier))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.backend_server.timeout,
        )))
        .layer(RequestBodyLimitLayer::new(body_limit_bytes(
            config.backend_server.body_limit,
        )?))
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                .allow_origin(site_origin)
                .allow_credentials(true),
        )
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.backend_server.port));
    let listener = TcpListener::bind(addr).await?;

    info!(
        port = config.backend_server.port,
        stage = %config.stage,
        "http: server is running"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn body_limit_bytes(body_limit_mib: u64) -> Result<usize> {
    let bytes = body_limit_mib
        .checked_mul(1024 * 1024)
        .context("SERVER_BODY_LIMIT is too large")?;
    usize::try_from(bytes).context("SERVER_BODY_LIMIT does not fit in memory")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = ?err, "http: failed to install CTRL+C signal handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = ?err, "http: failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("http: received ctrl+C signal"),
        _ = terminate => info!("http: received terminate signal"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_limit_is_mib() {
        assert_eq!(body_limit_bytes(2).unwrap(), 2 * 1024 * 1024);
    }

    #[test]
    fn oversized_body_limit_is_a_config_error() {
        assert!(body_limit_bytes(u64::MAX).is_err());
    }
}
