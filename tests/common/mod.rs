// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use leetrack::config::Config;
use leetrack::db::{FirestoreDb, MemoryDb, UserStore};
use leetrack::error::AppError;
use leetrack::models::{DifficultyCount, ProfilePatch, SolvedCounts, User};
use leetrack::routes::create_router;
use leetrack::services::StatProvider;
use leetrack::AppState;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// A registered user with no tracked slugs.
#[allow(dead_code)]
pub fn test_user(email: &str, username: Option<&str>) -> User {
    User {
        email: email.to_string(),
        username: username.map(str::to_string),
        name: "Test User".to_string(),
        institution: "N/A".to_string(),
        solved: SolvedCounts::default(),
        solved_questions: vec![],
        created_at: chrono::Utc::now().to_rfc3339(),
    }
}

/// Stat provider returning a fixed answer and counting calls.
pub struct ScriptedProvider {
    response: Mutex<Result<Vec<DifficultyCount>, String>>,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl ScriptedProvider {
    pub fn returning(pairs: &[(&str, u64)]) -> Arc<Self> {
        Arc::new(Self {
            response: Mutex::new(Ok(pairs
                .iter()
                .map(|(label, count)| DifficultyCount::new(*label, *count))
                .collect())),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Mutex::new(Err(message.to_string())),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatProvider for ScriptedProvider {
    async fn fetch_aggregate_counts(
        &self,
        _username: &str,
    ) -> Result<Vec<DifficultyCount>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response
            .lock()
            .unwrap()
            .clone()
            .map_err(AppError::Upstream)
    }
}

/// Store wrapper that counts every call before delegating.
#[derive(Clone, Default)]
pub struct CountingDb {
    pub inner: MemoryDb,
    calls: Arc<AtomicUsize>,
    writes: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl CountingDb {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn read(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn write(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserStore for CountingDb {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.read();
        self.inner.find_user_by_email(email).await
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.read();
        self.inner.find_user_by_username(username).await
    }

    async fn create_user(&self, user: &User) -> Result<(), AppError> {
        self.write();
        self.inner.create_user(user).await
    }

    async fn update_solved_slugs(&self, email: &str, slugs: &[String]) -> Result<(), AppError> {
        self.write();
        self.inner.update_solved_slugs(email, slugs).await
    }

    async fn add_solved_slug(&self, email: &str, slug: &str) -> Result<bool, AppError> {
        self.write();
        self.inner.add_solved_slug(email, slug).await
    }

    async fn remove_solved_slug(&self, email: &str, slug: &str) -> Result<bool, AppError> {
        self.write();
        self.inner.remove_solved_slug(email, slug).await
    }

    async fn update_aggregate_counts(
        &self,
        email: &str,
        counts: &SolvedCounts,
    ) -> Result<(), AppError> {
        self.write();
        self.inner.update_aggregate_counts(email, counts).await
    }

    async fn update_profile(&self, email: &str, patch: &ProfilePatch) -> Result<bool, AppError> {
        self.write();
        self.inner.update_profile(email, patch).await
    }
}

/// Create a test app over an in-memory store.
/// Returns the router, the store, and the shared state.
#[allow(dead_code)]
pub fn create_test_app(provider: Arc<ScriptedProvider>) -> (axum::Router, MemoryDb, Arc<AppState>) {
    let db = MemoryDb::new();
    let state = Arc::new(AppState::new(
        Config::test_default(),
        Arc::new(db.clone()),
        provider,
    ));
    (create_router(state.clone()), db, state)
}
