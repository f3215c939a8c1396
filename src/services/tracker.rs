// SPDX-License-Identifier: MIT

//! Solved-question tracking: list, add and remove problem slugs.

use std::sync::Arc;

use crate::db::UserStore;
use crate::error::{AppError, Result};
use crate::validation::{require_email, require_email_and_slug};

/// Returned by `list` when a user has no tracked slugs yet.
pub const DEFAULT_SOLVED_SLUG: &str = "two-sum";

/// Owns the per-user set of solved problem slugs.
#[derive(Clone)]
pub struct SolvedTracker {
    db: Arc<dyn UserStore>,
}

impl SolvedTracker {
    pub fn new(db: Arc<dyn UserStore>) -> Self {
        Self { db }
    }

    /// List a user's solved slugs.
    ///
    /// An empty stored set comes back as `["two-sum"]`, so an empty result
    /// never means "no data yet".
    pub async fn list(&self, email: &str) -> Result<Vec<String>> {
        require_email(email)?;

        let user = self
            .db
            .find_user_by_email(email)
            .await?
            .ok_or_else(|| user_not_found(email))?;

        if user.solved_questions.is_empty() {
            return Ok(vec![DEFAULT_SOLVED_SLUG.to_string()]);
        }
        Ok(user.solved_questions)
    }

    /// Mark `slug` as solved.
    ///
    /// `Conflict` when the slug is already tracked (exact, case-sensitive).
    /// The aggregate difficulty counts are left alone.
    pub async fn add(&self, email: &str, slug: &str) -> Result<()> {
        require_email_and_slug(email, slug)?;

        let user = self
            .db
            .find_user_by_email(email)
            .await?
            .ok_or_else(|| user_not_found(email))?;

        if user.has_solved(slug) {
            return Err(AppError::Conflict(format!("Question {} already solved", slug)));
        }

        // The store appends only if absent, so a racing duplicate add
        // cannot leave two copies behind.
        if !self.db.add_solved_slug(email, slug).await? {
            return Err(user_not_found(email));
        }

        tracing::info!(email = %email, slug = %slug, "Solved question added");
        Ok(())
    }

    /// Stop tracking `slug`. Removing an untracked slug succeeds.
    pub async fn remove(&self, email: &str, slug: &str) -> Result<()> {
        require_email_and_slug(email, slug)?;

        if !self.db.remove_solved_slug(email, slug).await? {
            return Err(user_not_found(email));
        }

        tracing::info!(email = %email, slug = %slug, "Solved question removed");
        Ok(())
    }
}

fn user_not_found(email: &str) -> AppError {
    AppError::NotFound(format!("User {} not found", email))
}
