// SPDX-License-Identifier: MIT

//! Leetrack: solved-question tracking backed by LeetCode stats
//!
//! This crate provides the backend API that keeps a user's solved problem
//! slugs and reconciles their per-difficulty totals with LeetCode.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod validation;

use std::sync::Arc;

use config::Config;
use db::UserStore;
use services::{ProfileService, SolvedTracker, StatProvider, StatReconciler};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub tracker: SolvedTracker,
    pub reconciler: StatReconciler,
    pub profiles: ProfileService,
}

impl AppState {
    /// Wire every service to the same store.
    pub fn new(config: Config, db: Arc<dyn UserStore>, provider: Arc<dyn StatProvider>) -> Self {
        Self {
            config,
            tracker: SolvedTracker::new(db.clone()),
            reconciler: StatReconciler::new(db.clone(), provider),
            profiles: ProfileService::new(db),
        }
    }
}
