use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::domains::auth::types::ErrorBody;
use crate::domains::auth::Role;
use crate::domains::consultation::{Consultation, ConsultationError, ConsultationId};
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

#[derive(Debug, Deserialize)]
pub struct CreateConsultationRequest {
    pub crop_type: String,
    pub diagnosis_summary: String,
    pub confidence_score: f32,
}

#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    pub expert_id: String,
}

#[derive(Debug, Deserialize)]
pub struct StartRequest {
    pub expert_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CompleteRequest {
    pub expert_id: String,
    pub response: String,
}

/// `POST /api/consultations` - farmer submits a diagnostic case.
///
/// Requires a session; the farmer identity comes from the bearer token,
/// the diagnosis fields from the (external) classification step.
pub async fn create_consultation_handler(
    Extension(state): Extension<AppState>,
    auth_user: Option<Extension<AuthUser>>,
    Json(request): Json<CreateConsultationRequest>,
) -> axum::response::Response {
    let Some(Extension(user)) = auth_user else {
        return unauthorized();
    };

    let consultation = state
        .deps
        .consultations
        .create(
            user.identity,
            request.crop_type,
            request.diagnosis_summary,
            request.confidence_score,
        )
        .await;

    (StatusCode::CREATED, Json(consultation)).into_response()
}

/// `GET /api/consultations` - farmers see their own cases, experts and
/// admins see everything.
pub async fn list_consultations_handler(
    Extension(state): Extension<AppState>,
    auth_user: Option<Extension<AuthUser>>,
) -> axum::response::Response {
    let Some(Extension(user)) = auth_user else {
        return unauthorized();
    };

    let consultations: Vec<Consultation> = match user.role {
        Role::Farmer => state.deps.consultations.list_for_farmer(&user.identity).await,
        Role::Expert | Role::Superadmin => state.deps.consultations.list_all().await,
    };

    (StatusCode::OK, Json(consultations)).into_response()
}

/// `GET /api/consultations/:id`
pub async fn get_consultation_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
) -> axum::response::Response {
    match state.deps.consultations.get(ConsultationId(id)).await {
        Ok(consultation) => (StatusCode::OK, Json(consultation)).into_response(),
        Err(e) => consultation_error_response(e),
    }
}

/// `POST /api/consultations/:id/assign`
pub async fn assign_consultation_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AssignRequest>,
) -> axum::response::Response {
    match state
        .deps
        .consultations
        .assign(ConsultationId(id), &request.expert_id)
        .await
    {
        Ok(consultation) => (StatusCode::OK, Json(consultation)).into_response(),
        Err(e) => consultation_error_response(e),
    }
}

/// `POST /api/consultations/:id/start`
pub async fn start_consultation_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<StartRequest>,
) -> axum::response::Response {
    match state
        .deps
        .consultations
        .start(ConsultationId(id), &request.expert_id)
        .await
    {
        Ok(consultation) => (StatusCode::OK, Json(consultation)).into_response(),
        Err(e) => consultation_error_response(e),
    }
}

/// `POST /api/consultations/:id/complete`
pub async fn complete_consultation_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CompleteRequest>,
) -> axum::response::Response {
    match state
        .deps
        .consultations
        .complete(ConsultationId(id), &request.expert_id, &request.response)
        .await
    {
        Ok(consultation) => (StatusCode::OK, Json(consultation)).into_response(),
        Err(e) => consultation_error_response(e),
    }
}

fn consultation_error_response(error: ConsultationError) -> axum::response::Response {
    let status = match &error {
        ConsultationError::NotFound => StatusCode::NOT_FOUND,
        ConsultationError::InvalidTransition { .. } => StatusCode::CONFLICT,
        ConsultationError::Forbidden => StatusCode::FORBIDDEN,
    };

    (status, Json(ErrorBody::new(error.code()))).into_response()
}

fn unauthorized() -> axum::response::Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorBody::new("AuthenticationRequired")),
    )
        .into_response()
}
