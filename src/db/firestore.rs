// SPDX-License-Identifier: MIT

//! Firestore client wrapper implementing [`UserStore`].
//!
//! One document per user in `users`, with the email as document ID.
//! Slug set changes use array transforms so concurrent adds of the same
//! slug never leave a duplicate behind.

use async_trait::async_trait;
use firestore::errors::FirestoreError;
use firestore::{FirestoreResult, FirestoreWritePrecondition};
use serde::{Deserialize, Serialize};

use crate::db::{collections, UserStore};
use crate::error::AppError;
use crate::models::{ProfilePatch, SolvedCounts, User};

const SOLVED_QUESTIONS_FIELD: &str = "solved_questions";
const SOLVED_FIELD: &str = "solved";

#[derive(Serialize, Deserialize)]
struct SolvedQuestionsUpdate {
    solved_questions: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct SolvedUpdate {
    solved: SolvedCounts,
}

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    async fn user_exists(&self, email: &str) -> Result<bool, AppError> {
        Ok(self.find_user_by_email(email).await?.is_some())
    }
}

/// Map a transform commit to "matched a record". A failed `Exists(true)`
/// precondition comes back as not-found.
fn commit_matched<T>(result: FirestoreResult<T>) -> Result<bool, AppError> {
    match result {
        Ok(_) => Ok(true),
        Err(FirestoreError::DataNotFoundError(_)) => Ok(false),
        Err(e) => Err(AppError::Database(format!("Transaction commit failed: {}", e))),
    }
}

#[async_trait]
impl UserStore for FirestoreDb {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(email)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let username = username.to_string();
        let users: Vec<User> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(move |q| q.for_all([q.field("username").eq(username.clone())]))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(users.into_iter().next())
    }

    async fn create_user(&self, user: &User) -> Result<(), AppError> {
        if self.user_exists(&user.email).await? {
            return Err(AppError::Conflict(format!(
                "User {} already exists",
                user.email
            )));
        }

        let _: User = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::USERS)
            .document_id(&user.email)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn update_solved_slugs(&self, email: &str, slugs: &[String]) -> Result<(), AppError> {
        let update = SolvedQuestionsUpdate {
            solved_questions: slugs.to_vec(),
        };
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .fields([SOLVED_QUESTIONS_FIELD])
            .in_col(collections::USERS)
            .document_id(email)
            .object(&update)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Array-union transform: Firestore appends the slug only if missing.
    async fn add_solved_slug(&self, email: &str, slug: &str) -> Result<bool, AppError> {
        let client = self.get_client()?;
        let slug = slug.to_string();

        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        client
            .fluent()
            .update()
            .in_col(collections::USERS)
            .precondition(FirestoreWritePrecondition::Exists(true))
            .transforms(|t| {
                t.fields([t
                    .field(SOLVED_QUESTIONS_FIELD)
                    .append_missing_elements([slug.clone()])])
            })
            .document_id(email)
            .only_transform()
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                AppError::Database(format!("Failed to add slug to transaction: {}", e))
            })?;

        commit_matched(transaction.commit().await)
    }

    /// Array-remove transform. An absent slug leaves the list untouched.
    async fn remove_solved_slug(&self, email: &str, slug: &str) -> Result<bool, AppError> {
        let client = self.get_client()?;
        let slug = slug.to_string();

        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        client
            .fluent()
            .update()
            .in_col(collections::USERS)
            .precondition(FirestoreWritePrecondition::Exists(true))
            .transforms(|t| {
                t.fields([t
                    .field(SOLVED_QUESTIONS_FIELD)
                    .remove_all_from_array([slug.clone()])])
            })
            .document_id(email)
            .only_transform()
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                AppError::Database(format!("Failed to add slug removal to transaction: {}", e))
            })?;

        commit_matched(transaction.commit().await)
    }

    async fn update_aggregate_counts(
        &self,
        email: &str,
        counts: &SolvedCounts,
    ) -> Result<(), AppError> {
        let update = SolvedUpdate { solved: *counts };
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .fields([SOLVED_FIELD])
            .in_col(collections::USERS)
            .document_id(email)
            .object(&update)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn update_profile(&self, email: &str, patch: &ProfilePatch) -> Result<bool, AppError> {
        // Fetch-modify-write so the mask only touches patched fields
        let Some(mut user) = self.find_user_by_email(email).await? else {
            return Ok(false);
        };
        patch.apply_to(&mut user);

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .fields(patch.field_names())
            .in_col(collections::USERS)
            .document_id(email)
            .object(&user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(true)
    }
}
