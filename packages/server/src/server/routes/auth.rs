use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use tracing::error;

use crate::domains::auth::types::{
    ErrorBody, OtpRequest, OtpSendResponse, OtpVerifyResponse, SessionPayload,
};
use crate::domains::auth::AuthError;
use crate::server::app::AppState;

/// `POST /api/auth/otp` - tagged send/verify actions.
///
/// The OTP code travels only through the delivery channel; success
/// responses never contain it.
pub async fn otp_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<OtpRequest>,
) -> axum::response::Response {
    let deps = &state.deps;

    match request {
        OtpRequest::Send { identity } => match deps.otp_issuer().issue(&identity).await {
            Ok(_) => (StatusCode::OK, Json(OtpSendResponse { success: true })).into_response(),
            Err(e) => auth_error_response(e),
        },
        OtpRequest::Verify { identity, code } => {
            match deps.otp_verifier().verify(&identity, &code).await {
                Ok(verified) => {
                    let role = deps.directory.role_for(verified.as_str());
                    let session = deps.sessions.issue(verified, role, None).await;
                    (
                        StatusCode::OK,
                        Json(OtpVerifyResponse {
                            success: true,
                            session: SessionPayload::from(session),
                        }),
                    )
                        .into_response()
                }
                Err(e) => auth_error_response(e),
            }
        }
    }
}

fn auth_error_response(error: AuthError) -> axum::response::Response {
    let status = match &error {
        // Delivery is infrastructure, not a client mistake
        AuthError::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    };

    if let AuthError::Delivery(source) = &error {
        error!(error = %source, "OTP delivery infrastructure failure");
    }

    let mut body = ErrorBody::new(error.code());
    body.attempts_remaining = error.attempts_remaining();

    (status, Json(body)).into_response()
}
