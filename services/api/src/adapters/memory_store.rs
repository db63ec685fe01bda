//! services/api/src/adapters/memory_store.rs
//!
//! This module contains the user-store adapter, the concrete implementation of
//! the `UserStore` port from the `core` crate. Accounts live in a map guarded by
//! a lock and are gone when the process exits.

use async_trait::async_trait;
use std::collections::HashMap;
use syllabus_core::domain::{Course, User};
use syllabus_core::ports::{PortError, PortResult, UserStore};
use tokio::sync::RwLock;

/// An in-memory user store keyed by email.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    /// Creates a new, empty `MemoryUserStore`.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn get_user(&self, email: &str) -> PortResult<User> {
        self.users
            .read()
            .await
            .get(email)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("user {}", email)))
    }

    async fn insert_user(&self, user: User) -> PortResult<()> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(PortError::Conflict(format!("user {}", user.email)));
        }
        users.insert(user.email.clone(), user);
        Ok(())
    }

    async fn save_courses(&self, email: &str, courses: Vec<Course>) -> PortResult<()> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(email)
            .ok_or_else(|| PortError::NotFound(format!("user {}", email)))?;
        user.courses = courses;
        Ok(())
    }
}
