// SPDX-License-Identifier: MIT

//! Solved-question and reconciliation routes.

use crate::error::{AppError, Result};
use crate::models::SolvedCounts;
use crate::services::ReconcileOutcome;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/getSolvedQuestions", post(get_solved_questions))
        .route("/addSolvedQuestion", post(add_solved_question))
        .route("/removeSolvedQuestion", post(remove_solved_question))
        .route("/updateSolvedWithLeetCode", post(update_solved_with_leetcode))
}

/// Unwrap a JSON body, turning extractor rejections into `BadRequest`.
pub(crate) fn json_body<T: DeserializeOwned>(
    payload: std::result::Result<Json<T>, JsonRejection>,
) -> Result<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

#[derive(Deserialize)]
pub(crate) struct EmailRequest {
    pub email: String,
}

#[derive(Deserialize)]
struct SolvedQuestionRequest {
    email: String,
    question_slug: String,
}

/// Plain acknowledgement.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MessageResponse {
    pub status: bool,
    pub message: String,
}

impl MessageResponse {
    pub(crate) fn ok(message: &str) -> Json<Self> {
        Json(Self {
            status: true,
            message: message.to_string(),
        })
    }
}

// ─── Solved Questions ────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SolvedQuestionsResponse {
    pub status: bool,
    pub solved_questions: Vec<String>,
}

async fn get_solved_questions(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<EmailRequest>, JsonRejection>,
) -> Result<Json<SolvedQuestionsResponse>> {
    let req = json_body(payload)?;
    let solved_questions = state.tracker.list(&req.email).await?;

    Ok(Json(SolvedQuestionsResponse {
        status: true,
        solved_questions,
    }))
}

async fn add_solved_question(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<SolvedQuestionRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let req = json_body(payload)?;
    state.tracker.add(&req.email, &req.question_slug).await?;
    Ok(MessageResponse::ok("Question added to solved list"))
}

async fn remove_solved_question(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<SolvedQuestionRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let req = json_body(payload)?;
    state.tracker.remove(&req.email, &req.question_slug).await?;
    Ok(MessageResponse::ok("Question removed from solved list"))
}

// ─── Reconciliation ──────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ReconcileResponse {
    pub status: bool,
    pub skipped: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solved: Option<SolvedCounts>,
}

async fn update_solved_with_leetcode(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<EmailRequest>, JsonRejection>,
) -> Result<Json<ReconcileResponse>> {
    let req = json_body(payload)?;

    let response = match state.reconciler.reconcile(&req.email).await? {
        ReconcileOutcome::Updated { solved } => ReconcileResponse {
            status: true,
            skipped: false,
            message: "Solved stats updated".to_string(),
            solved: Some(solved),
        },
        ReconcileOutcome::Skipped => ReconcileResponse {
            status: true,
            skipped: true,
            message: "LeetCode username not provided, skipping update".to_string(),
            solved: None,
        },
    };

    Ok(Json(response))
}
