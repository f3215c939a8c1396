// SPDX-License-Identifier: MIT

//! Stat reconciliation.
//!
//! Handles the workflow:
//! 1. Look up the user and their LeetCode username
//! 2. Fetch accepted-submission counts from the stat provider
//! 3. Overwrite the stored aggregate with the new snapshot
//!
//! Nothing is written unless the provider call fully succeeds.

use std::sync::Arc;

use serde::Serialize;

use crate::db::UserStore;
use crate::error::{AppError, Result};
use crate::models::SolvedCounts;
use crate::services::StatProvider;
use crate::validation::require_email;

/// Result of a reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReconcileOutcome {
    /// The stored aggregate was replaced with this snapshot.
    Updated { solved: SolvedCounts },
    /// No username configured; the provider was not contacted.
    Skipped,
}

/// Replaces stored aggregate counts with provider totals.
#[derive(Clone)]
pub struct StatReconciler {
    db: Arc<dyn UserStore>,
    provider: Arc<dyn StatProvider>,
}

impl StatReconciler {
    pub fn new(db: Arc<dyn UserStore>, provider: Arc<dyn StatProvider>) -> Self {
        Self { db, provider }
    }

    pub async fn reconcile(&self, email: &str) -> Result<ReconcileOutcome> {
        require_email(email)?;

        let user = self
            .db
            .find_user_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", email)))?;

        let Some(username) = user.provider_username() else {
            tracing::debug!(email = %email, "No LeetCode username, skipping reconciliation");
            return Ok(ReconcileOutcome::Skipped);
        };

        let pairs = self.provider.fetch_aggregate_counts(username).await?;
        let solved = SolvedCounts::from_pairs(&pairs);

        // Full replace: a tier missing from the provider becomes zero.
        self.db.update_aggregate_counts(email, &solved).await?;

        tracing::info!(
            email = %email,
            username,
            easy = solved.easy,
            medium = solved.medium,
            hard = solved.hard,
            "Solved stats reconciled"
        );

        Ok(ReconcileOutcome::Updated { solved })
    }
}
