//! crates/syllabus_core/src/session.rs
//!
//! Tracks who is logged in and mirrors each active user's course list.
//!
//! The `SessionManager` owns no accounts itself: it is handed a `UserStore` at
//! startup and syncs the active course list back into it whenever the list
//! changes and again on logout.

use crate::domain::{Course, LoginForm, SignupForm, User};
use crate::ports::{PortError, UserStore};
use crate::stats::CourseStats;
use crate::validation::{validate_login, validate_signup, ValidationError};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("User not found. Please sign up first.")]
    UserNotFound,
    #[error("Incorrect password")]
    IncorrectPassword,
    #[error("User already exists. Please login.")]
    UserExists,
    #[error("Not logged in")]
    InvalidSession,
    #[error("Course not found")]
    CourseNotFound,
    #[error("User store error: {0}")]
    Store(PortError),
}

/// The state of one logged-in user, shared by every session token they hold.
#[derive(Debug, Clone)]
pub struct ActiveSession {
    pub email: String,
    pub name: String,
    pub courses: Vec<Course>,
}

impl ActiveSession {
    fn for_user(user: User) -> Self {
        Self {
            email: user.email,
            name: user.name,
            courses: user.courses,
        }
    }
}

/// Tokens map to an email; course state is kept once per email.
#[derive(Default)]
struct ActiveSessions {
    tokens: HashMap<String, String>,
    users: HashMap<String, ActiveSession>,
}

impl ActiveSessions {
    fn get(&self, token: &str) -> Result<&ActiveSession, SessionError> {
        self.tokens
            .get(token)
            .and_then(|email| self.users.get(email))
            .ok_or(SessionError::InvalidSession)
    }

    fn get_mut(&mut self, token: &str) -> Result<&mut ActiveSession, SessionError> {
        let email = self.tokens.get(token).ok_or(SessionError::InvalidSession)?;
        self.users.get_mut(email).ok_or(SessionError::InvalidSession)
    }
}

pub struct SessionManager {
    store: Arc<dyn UserStore>,
    active: RwLock<ActiveSessions>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            store,
            active: RwLock::new(ActiveSessions::default()),
        }
    }

    /// Creates an account with an empty course list and logs it in.
    ///
    /// Returns the new session token together with the session it names.
    pub async fn sign_up(&self, form: SignupForm) -> Result<(String, ActiveSession), SessionError> {
        validate_signup(&form)?;

        let user = User::new(form.email, form.password, form.name);
        let session = ActiveSession::for_user(user.clone());

        self.store.insert_user(user).await.map_err(|e| match e {
            PortError::Conflict(_) => SessionError::UserExists,
            other => SessionError::Store(other),
        })?;

        Ok(self.open(session).await)
    }

    /// Logs in by exact comparison against the stored password.
    ///
    /// If the user is already logged in elsewhere the new token joins that
    /// session's course list; otherwise the saved list is restored from the store.
    pub async fn log_in(&self, form: LoginForm) -> Result<(String, ActiveSession), SessionError> {
        validate_login(&form)?;

        let user = self.store.get_user(&form.email).await.map_err(|e| match e {
            PortError::NotFound(_) => SessionError::UserNotFound,
            other => SessionError::Store(other),
        })?;

        if user.password != form.password {
            return Err(SessionError::IncorrectPassword);
        }

        Ok(self.open(ActiveSession::for_user(user)).await)
    }

    /// Saves the active course list back into the store, then ends the session.
    ///
    /// The shared course state is dropped once the user's last token is gone.
    pub async fn log_out(&self, token: &str) -> Result<ActiveSession, SessionError> {
        let mut active = self.active.write().await;
        let session = active.get(token)?.clone();

        self.store
            .save_courses(&session.email, session.courses.clone())
            .await
            .map_err(SessionError::Store)?;

        active.tokens.remove(token);
        if !active.tokens.values().any(|email| *email == session.email) {
            active.users.remove(&session.email);
        }
        Ok(session)
    }

    pub async fn session(&self, token: &str) -> Result<ActiveSession, SessionError> {
        self.active.read().await.get(token).cloned()
    }

    pub async fn courses(&self, token: &str) -> Result<Vec<Course>, SessionError> {
        Ok(self.session(token).await?.courses)
    }

    /// Appends a course and writes the list through to the store.
    ///
    /// The active list only changes once the store has accepted the new one.
    pub async fn add_course(&self, token: &str, course: Course) -> Result<Vec<Course>, SessionError> {
        let mut active = self.active.write().await;
        let session = active.get_mut(token)?;

        let mut courses = session.courses.clone();
        courses.push(course);
        self.store
            .save_courses(&session.email, courses.clone())
            .await
            .map_err(SessionError::Store)?;

        session.courses = courses.clone();
        Ok(courses)
    }

    /// Removes exactly the course with `course_id`, keeping the order of the rest.
    pub async fn remove_course(&self, token: &str, course_id: Uuid) -> Result<Course, SessionError> {
        let mut active = self.active.write().await;
        let session = active.get_mut(token)?;

        let index = session
            .courses
            .iter()
            .position(|c| c.id == course_id)
            .ok_or(SessionError::CourseNotFound)?;
        let mut courses = session.courses.clone();
        let removed = courses.remove(index);

        self.store
            .save_courses(&session.email, courses.clone())
            .await
            .map_err(SessionError::Store)?;

        session.courses = courses;
        Ok(removed)
    }

    pub async fn overview(&self, token: &str) -> Result<CourseStats, SessionError> {
        let active = self.active.read().await;
        Ok(CourseStats::from_courses(&active.get(token)?.courses))
    }

    async fn open(&self, session: ActiveSession) -> (String, ActiveSession) {
        let token = Uuid::new_v4().to_string();
        let mut active = self.active.write().await;

        let shared = active
            .users
            .entry(session.email.clone())
            .or_insert(session)
            .clone();
        active.tokens.insert(token.clone(), shared.email.clone());
        (token, shared)
    }
}
