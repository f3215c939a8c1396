// SPDX-License-Identifier: MIT

//! Aggregate solved counts, as reported by the stat provider.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Per-difficulty totals of solved problems.
///
/// Replaced wholesale on each reconciliation, never merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SolvedCounts {
    #[serde(default)]
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub easy: u64,
    #[serde(default)]
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub medium: u64,
    #[serde(default)]
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub hard: u64,
}

/// One `(difficulty, count)` pair from the provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DifficultyCount {
    pub difficulty: String,
    pub count: u64,
}

impl DifficultyCount {
    pub fn new(difficulty: impl Into<String>, count: u64) -> Self {
        Self {
            difficulty: difficulty.into(),
            count,
        }
    }
}

impl SolvedCounts {
    /// Build a snapshot from provider pairs.
    ///
    /// Labels match exactly ("Easy", "Medium", "Hard"); anything else,
    /// including the provider's "All" row, is ignored. Tiers absent from
    /// the list stay at zero.
    pub fn from_pairs(pairs: &[DifficultyCount]) -> Self {
        let mut counts = Self::default();
        for pair in pairs {
            match pair.difficulty.as_str() {
                "Easy" => counts.easy = pair.count,
                "Medium" => counts.medium = pair.count,
                "Hard" => counts.hard = pair.count,
                _ => {}
            }
        }
        counts
    }
}
