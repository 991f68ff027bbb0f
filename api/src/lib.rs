use std::sync::Arc;

pub mod core;
pub mod error_handler;
pub mod middleware_layer;
mod routes;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::{net::TcpListener, signal};
use tracing::{error, info};

use crate::{
    core::{app_state::AppState, config::ApiConfig},
    error_handler::AppError,
    middleware_layer::{auth::require_session, request_id::ensure_request_id},
    routes::{
        demo_result::demo_result_route::demo_result_route, health_route::health_route,
        list_models::list_models_route::list_models_route,
        repair_advice::repair_advice_route::repair_advice_route,
    },
};

/// Builds the full router. Everything but `/health` sits behind the bearer guard.
pub fn build_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/api/repair-advice", post(repair_advice_route))
        .route("/api/demo-result", get(demo_result_route))
        .route("/api/list-models", get(list_models_route))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    Router::new()
        .merge(protected)
        .route("/health", get(health_route))
        .layer(middleware::from_fn(ensure_request_id))
        .with_state(state)
}

/// Binds `config.api_address` and serves until Ctrl+C.
pub async fn start(config: ApiConfig) -> Result<(), AppError> {
    let addr = config.api_address.clone();
    let state = Arc::new(AppState::from_config(config)?);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| AppError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!(%addr, "API listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("API stopped");
    Ok(())
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        // Without a signal handler the server keeps running until killed.
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
