//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::middleware::session_auth_middleware;
use crate::server::routes::{
    assign_consultation_handler, complete_consultation_handler, create_consultation_handler,
    get_consultation_handler, health_handler, list_consultations_handler, otp_handler,
    start_consultation_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
}

/// Build the Axum application router
pub fn build_app(deps: Arc<ServerDeps>) -> Router {
    let state = AppState { deps };

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/auth/otp", post(otp_handler))
        .route(
            "/api/consultations",
            post(create_consultation_handler).get(list_consultations_handler),
        )
        .route("/api/consultations/:id", get(get_consultation_handler))
        .route("/api/consultations/:id/assign", post(assign_consultation_handler))
        .route("/api/consultations/:id/start", post(start_consultation_handler))
        .route(
            "/api/consultations/:id/complete",
            post(complete_consultation_handler),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_auth_middleware,
        ))
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
