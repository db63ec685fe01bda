//! crates/syllabus_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any transport or storage adapter.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

/// An account held in memory for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct User {
    pub email: String,
    // Plaintext; accounts never outlive the process.
    pub password: String,
    pub name: String,
    pub courses: Vec<Course>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: String, password: String, name: String) -> Self {
        Self {
            email,
            password,
            name,
            courses: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

/// The structured answer the analysis model is asked to return.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseAnalysis {
    pub course_name: String,
    pub hours_per_week: f64,
    pub difficulty: f64,
    #[serde(default)]
    pub reasoning: String,
}

/// One analyzed syllabus, owned by exactly one user's course list.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: Uuid,
    pub file_name: String,
    pub course_name: String,
    pub hours_per_week: f64,
    pub difficulty: f64,
    pub reasoning: String,
}

impl Course {
    /// Combines a fresh id and the uploaded file name with the model's analysis.
    pub fn from_analysis(file_name: impl Into<String>, analysis: CourseAnalysis) -> Self {
        Self {
            id: Uuid::new_v4(),
            file_name: file_name.into(),
            course_name: analysis.course_name,
            hours_per_week: analysis.hours_per_week,
            difficulty: analysis.difficulty,
            reasoning: analysis.reasoning,
        }
    }
}

// Form payloads. Only used for sign-up/login, they contain the raw password.
#[derive(Debug, Clone)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// A single uploaded file, as received from the inbound boundary.
#[derive(Debug, Clone)]
pub struct SyllabusUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}
