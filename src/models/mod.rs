// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod solved;
pub mod user;

pub use solved::{DifficultyCount, SolvedCounts};
pub use user::{NewUser, ProfilePatch, User};
