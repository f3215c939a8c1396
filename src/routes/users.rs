// SPDX-License-Identifier: MIT

//! Registration and profile routes.

use crate::error::{AppError, Result};
use crate::models::{NewUser, ProfilePatch, User};
use crate::routes::api::{json_body, EmailRequest, MessageResponse};
use crate::services::UserStatsView;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{patch, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/addUser", post(add_user))
        .route("/getUserData", post(get_user_data))
        .route("/updateUser", patch(update_user))
        .route("/getStats", post(get_stats))
}

#[derive(Serialize)]
pub struct CreatedResponse {
    pub status: bool,
    pub inserted_id: String,
}

async fn add_user(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<NewUser>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    let new_user = json_body(payload)?;
    let user = state.profiles.register(new_user).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            status: true,
            inserted_id: user.email,
        }),
    ))
}

#[derive(Serialize)]
pub struct UserDataResponse {
    pub status: bool,
    #[serde(flatten)]
    pub user: User,
}

async fn get_user_data(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<EmailRequest>, JsonRejection>,
) -> Result<Json<UserDataResponse>> {
    let req = json_body(payload)?;
    let user = state.profiles.get_user(&req.email).await?;
    Ok(Json(UserDataResponse { status: true, user }))
}

/// Body is `{"email": ..., <allow-listed fields>}`; the email selects the
/// record and is never itself updated.
async fn update_user(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let mut fields = json_body(payload)?;

    let email = match fields.remove("email") {
        Some(Value::String(email)) => email,
        _ => return Err(AppError::BadRequest("Invalid or missing email".to_string())),
    };

    let patch: ProfilePatch = serde_json::from_value(Value::Object(fields))
        .map_err(|e| AppError::BadRequest(format!("Invalid update fields: {}", e)))?;

    state.profiles.update_profile(&email, &patch).await?;
    Ok(MessageResponse::ok("User data updated"))
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub status: bool,
    #[serde(rename = "userStats")]
    pub user_stats: crate::models::SolvedCounts,
    pub solved_questions: Vec<String>,
}

async fn get_stats(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<EmailRequest>, JsonRejection>,
) -> Result<Json<StatsResponse>> {
    let req = json_body(payload)?;
    let UserStatsView {
        solved,
        solved_questions,
    } = state.profiles.get_stats(&req.email).await?;

    Ok(Json(StatsResponse {
        status: true,
        user_stats: solved,
        solved_questions,
    }))
}
