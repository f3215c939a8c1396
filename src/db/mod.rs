//! Database layer: the user store interface and its adapters.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{ProfilePatch, SolvedCounts, User};

/// Collection names as constants.
pub mod collections {
    /// User records (keyed by email)
    pub const USERS: &str = "users";
}

/// Persistence operations the services rely on.
///
/// Every write is a single-document update; nothing here spans records.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Insert a new record. `Conflict` if the email is taken.
    async fn create_user(&self, user: &User) -> Result<(), AppError>;

    /// Replace the whole slug list.
    async fn update_solved_slugs(&self, email: &str, slugs: &[String]) -> Result<(), AppError>;

    /// Add `slug` unless already present. Returns whether a record matched.
    ///
    /// Must be atomic per record: concurrent adds of different slugs all land.
    async fn add_solved_slug(&self, email: &str, slug: &str) -> Result<bool, AppError>;

    /// Remove every occurrence of `slug`. Returns whether a record matched;
    /// an absent slug on an existing record still counts as matched.
    async fn remove_solved_slug(&self, email: &str, slug: &str) -> Result<bool, AppError>;

    async fn update_aggregate_counts(
        &self,
        email: &str,
        counts: &SolvedCounts,
    ) -> Result<(), AppError>;

    /// Apply an allow-listed profile patch. Returns whether a record matched.
    async fn update_profile(&self, email: &str, patch: &ProfilePatch) -> Result<bool, AppError>;
}
