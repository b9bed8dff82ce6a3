use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    stores: StoreGauges,
}

#[derive(Serialize)]
pub struct StoreGauges {
    pending_otps: usize,
    active_sessions: usize,
    consultations: usize,
}

/// Health check endpoint
///
/// The stores are in-process, so there is no external dependency to
/// probe; the gauges are for dashboards.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let deps = &state.deps;

    let stores = StoreGauges {
        pending_otps: deps.otp_store.len().await,
        active_sessions: deps.sessions.len().await,
        consultations: deps.consultations.len().await,
    };

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            stores,
        }),
    )
}
