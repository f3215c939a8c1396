// SPDX-License-Identifier: MIT

//! LeetCode GraphQL client for aggregate solved counts.
//!
//! Handles:
//! - The `getUserProfile` query by username
//! - Status and body checks (anything unexpected is an upstream error)
//! - A hard timeout on every call

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::DifficultyCount;

const USER_PROFILE_QUERY: &str = r#"
query getUserProfile($username: String!) {
    matchedUser(username: $username) {
        submitStats {
            acSubmissionNum {
                difficulty
                count
            }
        }
    }
}"#;

/// Source of per-difficulty accepted-submission counts.
#[async_trait]
pub trait StatProvider: Send + Sync {
    async fn fetch_aggregate_counts(&self, username: &str)
        -> Result<Vec<DifficultyCount>, AppError>;
}

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: UsernameVariables<'a>,
}

#[derive(Serialize)]
struct UsernameVariables<'a> {
    username: &'a str,
}

#[derive(Debug, Deserialize)]
struct UserProfileResponse {
    data: Option<UserProfileData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserProfileData {
    matched_user: Option<MatchedUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchedUser {
    submit_stats: SubmitStats,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitStats {
    ac_submission_num: Vec<DifficultyCount>,
}

/// Pull the difficulty pairs out of a decoded response body.
fn extract_counts(
    username: &str,
    body: UserProfileResponse,
) -> Result<Vec<DifficultyCount>, AppError> {
    body.data
        .and_then(|d| d.matched_user)
        .map(|u| u.submit_stats.ac_submission_num)
        .ok_or_else(|| AppError::Upstream(format!("No LeetCode user named {}", username)))
}

/// LeetCode GraphQL API client.
#[derive(Clone)]
pub struct LeetCodeClient {
    http: reqwest::Client,
    graphql_url: String,
}

impl LeetCodeClient {
    /// Create a client whose calls give up after `timeout`.
    pub fn new(graphql_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client build failed: {}", e)))?;

        Ok(Self {
            http,
            graphql_url: graphql_url.into(),
        })
    }

    /// Check response status and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                tracing::warn!("LeetCode rate limit hit (429)");
            }

            return Err(AppError::Upstream(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("JSON parse error: {}", e)))
    }
}

#[async_trait]
impl StatProvider for LeetCodeClient {
    async fn fetch_aggregate_counts(
        &self,
        username: &str,
    ) -> Result<Vec<DifficultyCount>, AppError> {
        let request = GraphQlRequest {
            query: USER_PROFILE_QUERY,
            variables: UsernameVariables { username },
        };

        let response = self
            .http
            .post(&self.graphql_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::Upstream("LeetCode request timed out".to_string())
                } else {
                    AppError::Upstream(format!("LeetCode request failed: {}", e))
                }
            })?;

        let body: UserProfileResponse = self.check_response_json(response).await?;
        extract_counts(username, body)
    }
}
