use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
    routing::post,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    adapters::http::{admin_auth::AdminAccess, app_state::AppState},
    app_error::AppResult,
};

use super::{json_body, required_email};

#[derive(Deserialize)]
struct MirrorPayload {
    #[serde(default)]
    email: Option<Value>,
}

#[derive(Serialize)]
struct MirrorResponse {
    success: bool,
    message: &'static str,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/google-sheets", post(forward_to_sheet))
}

/// Push a single email straight to the Google Sheet, bypassing the store.
async fn forward_to_sheet(
    State(app_state): State<AppState>,
    _admin: AdminAccess,
    body: Result<Json<MirrorPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let email = required_email(json_body(body)?.email)?;

    app_state.waitlist_use_cases.forward_to_mirror(&email).await?;

    Ok(Json(MirrorResponse {
        success: true,
        message: "Email saved successfully to Google Sheet",
    }))
}
