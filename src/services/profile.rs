// SPDX-License-Identifier: MIT

//! Registration and profile maintenance.

use std::sync::Arc;

use serde::Serialize;
use validator::Validate;

use crate::db::UserStore;
use crate::error::{AppError, Result};
use crate::models::{NewUser, ProfilePatch, SolvedCounts, User};
use crate::validation::require_email;

/// Stored stats for a user, as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStatsView {
    pub solved: SolvedCounts,
    pub solved_questions: Vec<String>,
}

#[derive(Clone)]
pub struct ProfileService {
    db: Arc<dyn UserStore>,
}

impl ProfileService {
    pub fn new(db: Arc<dyn UserStore>) -> Self {
        Self { db }
    }

    /// Create a user record with registration defaults filled in.
    ///
    /// Only a caller-chosen username must be unique. One derived from the
    /// email local part may be shared.
    pub async fn register(&self, mut new_user: NewUser) -> Result<User> {
        require_email(&new_user.email)?;
        // Blank means "not supplied"
        new_user.username = new_user.username.filter(|u| !u.trim().is_empty());
        new_user.validate()?;

        if let Some(username) = new_user.username.as_deref() {
            self.ensure_username_free(username, &new_user.email).await?;
        }
        let user = new_user.into_user(chrono::Utc::now().to_rfc3339());

        self.db.create_user(&user).await?;
        tracing::info!(email = %user.email, "User registered");
        Ok(user)
    }

    pub async fn get_user(&self, email: &str) -> Result<User> {
        require_email(email)?;
        self.db
            .find_user_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", email)))
    }

    /// Stored aggregate and slug list, without the list-default substitution.
    pub async fn get_stats(&self, email: &str) -> Result<UserStatsView> {
        let user = self.get_user(email).await?;
        Ok(UserStatsView {
            solved: user.solved,
            solved_questions: user.solved_questions,
        })
    }

    pub async fn update_profile(&self, email: &str, patch: &ProfilePatch) -> Result<()> {
        require_email(email)?;
        if patch.is_empty() {
            return Err(AppError::BadRequest("No fields to update".to_string()));
        }
        patch.validate()?;

        if let Some(username) = patch.username.as_deref() {
            self.ensure_username_free(username, email).await?;
        }

        if !self.db.update_profile(email, patch).await? {
            return Err(AppError::NotFound(format!("User {} not found", email)));
        }

        tracing::info!(email = %email, fields = ?patch.field_names(), "Profile updated");
        Ok(())
    }

    async fn ensure_username_free(&self, username: &str, email: &str) -> Result<()> {
        match self.db.find_user_by_username(username).await? {
            Some(existing) if existing.email != email => Err(AppError::Conflict(format!(
                "Username {} already exists",
                username
            ))),
            _ => Ok(()),
        }
    }
}
