use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::domains::auth::Role;
use crate::server::app::AppState;

/// Authenticated user information from session
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub identity: String,
    pub name: String,
    pub role: Role,
}

/// Middleware to extract session and populate auth user
///
/// This middleware:
/// 1. Extracts the session token from the Authorization header
/// 2. Looks up the session in the SessionStore
/// 3. Stores AuthUser in request extensions
///
/// Note: it does NOT block requests - it only extracts auth info.
/// Authorization checks happen in the handlers.
pub async fn session_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(user) = extract_auth_user(request.headers(), &state).await {
        request.extensions_mut().insert(user);
    }

    next.run(request).await
}

/// Extract and verify auth user from request
async fn extract_auth_user(headers: &HeaderMap, state: &AppState) -> Option<AuthUser> {
    let auth_header = headers.get("authorization")?;
    let auth_str = auth_header.to_str().ok()?;

    // Remove "Bearer " prefix
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);

    let session = state.deps.sessions.get(token).await?;

    Some(AuthUser {
        identity: session.identity.to_string(),
        name: session.name,
        role: session.role,
    })
}
