// SPDX-License-Identifier: MIT

//! Process-local [`UserStore`], for tests and GCP-free development.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::db::UserStore;
use crate::error::AppError;
use crate::models::{ProfilePatch, SolvedCounts, User};

/// In-memory user store keyed by email.
#[derive(Clone, Default)]
pub struct MemoryDb {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record directly, bypassing registration rules.
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.email.clone(), user);
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryDb {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.username.as_deref() == Some(username))
            .cloned())
    }

    async fn create_user(&self, user: &User) -> Result<(), AppError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(AppError::Conflict(format!(
                "User {} already exists",
                user.email
            )));
        }
        users.insert(user.email.clone(), user.clone());
        Ok(())
    }

    async fn update_solved_slugs(&self, email: &str, slugs: &[String]) -> Result<(), AppError> {
        if let Some(user) = self.users.write().await.get_mut(email) {
            user.solved_questions = slugs.to_vec();
        }
        Ok(())
    }

    async fn add_solved_slug(&self, email: &str, slug: &str) -> Result<bool, AppError> {
        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(email) else {
            return Ok(false);
        };
        if !user.has_solved(slug) {
            user.solved_questions.push(slug.to_string());
        }
        Ok(true)
    }

    async fn remove_solved_slug(&self, email: &str, slug: &str) -> Result<bool, AppError> {
        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(email) else {
            return Ok(false);
        };
        user.solved_questions.retain(|s| s != slug);
        Ok(true)
    }

    async fn update_aggregate_counts(
        &self,
        email: &str,
        counts: &SolvedCounts,
    ) -> Result<(), AppError> {
        if let Some(user) = self.users.write().await.get_mut(email) {
            user.solved = *counts;
        }
        Ok(())
    }

    async fn update_profile(&self, email: &str, patch: &ProfilePatch) -> Result<bool, AppError> {
        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(email) else {
            return Ok(false);
        };
        patch.apply_to(user);
        Ok(true)
    }
}
