//! services/api/src/web/auth.rs
//!
//! Authentication endpoints for user signup, login, and logout.

use crate::web::{errors::session_error_response, state::AppState};
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use syllabus_core::domain::{LoginForm, SignupForm};
use syllabus_core::session::ActiveSession;
use tracing::info;
use utoipa::ToSchema;

const SESSION_COOKIE: &str = "session";

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub email: String,
    pub name: String,
    pub course_count: usize,
}

impl From<&ActiveSession> for AuthResponse {
    fn from(session: &ActiveSession) -> Self {
        Self {
            email: session.email.clone(),
            name: session.name.clone(),
            course_count: session.courses.len(),
        }
    }
}

//=========================================================================================
// Cookie Helpers
//=========================================================================================

/// Reads the session token from the request's `Cookie` header.
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())?
        .split(';')
        .find_map(|c| c.trim().strip_prefix(SESSION_COOKIE)?.strip_prefix('='))
}

fn session_cookie(token: &str) -> String {
    format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        SESSION_COOKIE,
        token,
        Duration::days(1).num_seconds()
    )
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /auth/signup - Create a new user account
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created successfully", body = AuthResponse),
        (status = 400, description = "Missing fields"),
        (status = 409, description = "User already exists")
    )
)]
pub async fn signup_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let form = SignupForm {
        email: req.email,
        password: req.password,
        name: req.name,
    };

    let (token, session) = state
        .sessions
        .sign_up(form)
        .await
        .map_err(session_error_response)?;

    info!(email = %session.email, "User signed up");

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, session_cookie(&token))],
        Json(AuthResponse::from(&session)),
    ))
}

/// POST /auth/login - Login with existing account
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Missing fields"),
        (status = 401, description = "Unknown user or incorrect password")
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let form = LoginForm {
        email: req.email,
        password: req.password,
    };

    let (token, session) = state
        .sessions
        .log_in(form)
        .await
        .map_err(session_error_response)?;

    info!(email = %session.email, courses = session.courses.len(), "User logged in");

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, session_cookie(&token))],
        Json(AuthResponse::from(&session)),
    ))
}

/// POST /auth/logout - Save the course list and end the session
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 200, description = "Logout successful"),
        (status = 401, description = "No active session")
    )
)]
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let token = session_token(&headers)
        .ok_or((StatusCode::UNAUTHORIZED, "No session found".to_string()))?;

    let session = state
        .sessions
        .log_out(token)
        .await
        .map_err(session_error_response)?;

    info!(email = %session.email, courses = session.courses.len(), "User logged out");

    let cookie = format!("{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0", SESSION_COOKIE);
    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn reads_session_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; session=abc-123"));
        assert_eq!(session_token(&headers), Some("abc-123"));
    }

    #[test]
    fn cookies_sharing_the_name_prefix_are_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("session_old=stale; session=fresh"));
        assert_eq!(session_token(&headers), Some("fresh"));
    }

    #[test]
    fn missing_cookie_yields_none() {
        assert_eq!(session_token(&HeaderMap::new()), None);
    }
}
