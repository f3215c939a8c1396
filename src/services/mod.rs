// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod leetcode;
pub mod profile;
pub mod reconciler;
pub mod tracker;

pub use leetcode::{LeetCodeClient, StatProvider};
pub use profile::{ProfileService, UserStatsView};
pub use reconciler::{ReconcileOutcome, StatReconciler};
pub use tracker::{SolvedTracker, DEFAULT_SOLVED_SLUG};
