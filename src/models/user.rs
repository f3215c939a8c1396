//! User model for storage and API.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::SolvedCounts;
use crate::validation::validate_username;

/// Default for profile text fields left empty at registration.
pub const UNSET_PROFILE_FIELD: &str = "N/A";

/// User record stored in Firestore, keyed by email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Email address (also used as document ID)
    pub email: String,
    /// LeetCode username, used as the stat provider lookup key
    #[serde(default)]
    pub username: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub institution: String,
    /// Aggregate counts from the last reconciliation
    #[serde(default)]
    pub solved: SolvedCounts,
    /// Solved problem slugs (membership only)
    #[serde(default)]
    pub solved_questions: Vec<String>,
    /// When the user registered (RFC 3339)
    #[serde(default)]
    pub created_at: String,
}

impl User {
    /// The provider username, if one is configured and non-blank.
    pub fn provider_username(&self) -> Option<&str> {
        self.username
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
    }

    pub fn has_solved(&self, slug: &str) -> bool {
        self.solved_questions.iter().any(|s| s == slug)
    }
}

/// Registration request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 100), custom(function = "validate_username"))]
    pub username: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub institution: Option<String>,
    #[serde(default)]
    pub solved: Option<SolvedCounts>,
}

impl NewUser {
    /// Fill in registration defaults.
    ///
    /// A missing username falls back to the local part of the email.
    pub fn into_user(self, created_at: String) -> User {
        let username = self
            .username
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| local_part(&self.email).to_string());

        User {
            username: Some(username),
            name: non_blank_or_unset(self.name),
            institution: non_blank_or_unset(self.institution),
            solved: self.solved.unwrap_or_default(),
            solved_questions: Vec::new(),
            created_at,
            email: self.email,
        }
    }
}

fn local_part(email: &str) -> &str {
    email.split_once('@').map_or(email, |(local, _)| local)
}

fn non_blank_or_unset(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| UNSET_PROFILE_FIELD.to_string())
}

/// Allow-listed profile update. Email and the solved fields are not
/// patchable here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ProfilePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100), custom(function = "validate_username"))]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100))]
    pub institution: Option<String>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.name.is_none() && self.institution.is_none()
    }

    /// Field names present in the patch, for update masks.
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.username.is_some() {
            fields.push("username");
        }
        if self.name.is_some() {
            fields.push("name");
        }
        if self.institution.is_some() {
            fields.push("institution");
        }
        fields
    }

    pub fn apply_to(&self, user: &mut User) {
        if let Some(username) = &self.username {
            user.username = Some(username.clone());
        }
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(institution) = &self.institution {
            user.institution = institution.clone();
        }
    }
}
