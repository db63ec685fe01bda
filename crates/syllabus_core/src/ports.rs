//! crates/syllabus_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like the user store or
//! the remote analysis model.

use async_trait::async_trait;
use crate::domain::{Course, User};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for storage port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    Conflict(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

/// Any failure while asking the remote model for a course analysis.
///
/// Network failures, non-success statuses and malformed replies all surface as
/// this one type; they differ only by message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Failed to analyze: {message}")]
pub struct AnalysisError {
    message: String,
}

impl AnalysisError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_user(&self, email: &str) -> PortResult<User>;

    /// Inserts a new user. Fails with `PortError::Conflict` if the email is taken.
    async fn insert_user(&self, user: User) -> PortResult<()>;

    /// Replaces the stored course list of an existing user.
    async fn save_courses(&self, email: &str, courses: Vec<Course>) -> PortResult<()>;
}

#[async_trait]
pub trait SyllabusAnalysisService: Send + Sync {
    /// Given extracted syllabus text and the uploaded file name, produces a course
    /// record or fails.
    async fn analyze(&self, text: &str, file_name: &str) -> Result<Course, AnalysisError>;
}
