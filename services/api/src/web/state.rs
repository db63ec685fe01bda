//! services/api/src/web/state.rs
//!
//! Defines the application's shared state and the per-request session marker.

use std::sync::Arc;
use syllabus_core::ports::SyllabusAnalysisService;
use syllabus_core::session::SessionManager;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionManager>,
    pub analyzer: Arc<dyn SyllabusAnalysisService>,
}

/// The validated session token, inserted into request extensions by `require_auth`.
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);
