//! services/api/src/web/errors.rs
//!
//! Maps core errors onto the status code and user-visible message a handler returns.

use axum::http::StatusCode;
use syllabus_core::{pipeline::UploadError, session::SessionError};
use tracing::{error, warn};

pub fn session_error_response(e: SessionError) -> (StatusCode, String) {
    let status = match &e {
        SessionError::Validation(_) => StatusCode::BAD_REQUEST,
        SessionError::UserNotFound | SessionError::IncorrectPassword | SessionError::InvalidSession => {
            StatusCode::UNAUTHORIZED
        }
        SessionError::UserExists => StatusCode::CONFLICT,
        SessionError::CourseNotFound => StatusCode::NOT_FOUND,
        SessionError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        error!("Session operation failed: {:?}", e);
    } else {
        warn!("Session operation rejected: {}", e);
    }
    (status, e.to_string())
}

pub fn upload_error_response(e: UploadError) -> (StatusCode, String) {
    let status = match &e {
        UploadError::Validation(_) => StatusCode::BAD_REQUEST,
        UploadError::Analysis(_) => StatusCode::BAD_GATEWAY,
    };
    warn!("Upload failed: {}", e);
    (status, e.to_string())
}
