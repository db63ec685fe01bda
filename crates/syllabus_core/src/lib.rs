pub mod analysis;
pub mod domain;
pub mod extract;
pub mod pipeline;
pub mod ports;
pub mod session;
pub mod stats;
pub mod validation;

pub use domain::{Course, CourseAnalysis, LoginForm, SignupForm, SyllabusUpload, User};
pub use extract::extract_text;
pub use pipeline::{process_upload, UploadError};
pub use ports::{AnalysisError, PortError, PortResult, SyllabusAnalysisService, UserStore};
pub use session::{ActiveSession, SessionError, SessionManager};
pub use stats::{CourseStats, WorkloadLevel};
pub use validation::ValidationError;
