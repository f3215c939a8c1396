// SPDX-License-Identifier: MIT

//! Input validation shared by every operation.

use regex::Regex;
use std::sync::LazyLock;
use validator::ValidationError;

use crate::error::{AppError, Result};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid username regex"));

/// Syntactic email check. No DNS or mailbox verification.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Gate for operations keyed by email.
pub fn require_email(email: &str) -> Result<()> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(AppError::BadRequest("Invalid email".to_string()))
    }
}

/// Gate for operations keyed by email and problem slug.
pub fn require_email_and_slug(email: &str, slug: &str) -> Result<()> {
    if !is_valid_email(email) || slug.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Invalid email or question slug".to_string(),
        ));
    }
    Ok(())
}

/// Field validator for provider usernames.
pub fn validate_username(username: &str) -> std::result::Result<(), ValidationError> {
    if USERNAME_RE.is_match(username) {
        Ok(())
    } else {
        Err(ValidationError::new("username_charset"))
    }
}
