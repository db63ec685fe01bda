//! services/api/src/web/middleware.rs
//!
//! Authentication middleware for protecting routes.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::warn;

use crate::web::{
    auth::session_token,
    state::{AppState, SessionToken},
};

/// Middleware that checks the `session` cookie against the active sessions.
///
/// If valid, inserts the `SessionToken` into request extensions for handlers to use.
/// If invalid or missing, returns 401 Unauthorized.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = session_token(req.headers())
        .ok_or(StatusCode::UNAUTHORIZED)?
        .to_string();

    state.sessions.session(&token).await.map_err(|e| {
        warn!("Rejected request: {}", e);
        StatusCode::UNAUTHORIZED
    })?;

    req.extensions_mut().insert(SessionToken(token));

    Ok(next.run(req).await)
}
