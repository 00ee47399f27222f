use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{json_body, optional_text, required_email};
use crate::{
    adapters::http::{admin_auth::AdminAccess, app_state::AppState},
    app_error::AppResult,
    application::use_cases::waitlist::SubscribeOutcome,
    entities::{signup_channel::SignupChannel, waitlist_entry::WaitlistEntry},
};

// Fields stay untyped so a wrong JSON type gets the same 400 as a missing field.
#[derive(Deserialize)]
struct SignupPayload {
    #[serde(default)]
    email: Option<Value>,
    #[serde(default, rename = "userType")]
    user_type: Option<Value>,
}

#[derive(Deserialize)]
struct RemovePayload {
    #[serde(default)]
    email: Option<Value>,
}

#[derive(Deserialize)]
struct ListQuery {
    #[serde(default)]
    include_entries: bool,
}

#[derive(Serialize)]
struct WaitlistSummary {
    success: bool,
    count: u64,
    timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    entries: Option<Vec<WaitlistEntry>>,
}

#[derive(Serialize)]
struct MessageResponse {
    success: bool,
    message: &'static str,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/waitlist",
            get(get_waitlist)
                .post(add_to_waitlist)
                .delete(remove_from_waitlist),
        )
        .route("/subscribe", post(subscribe))
}

async fn get_waitlist(
    State(app_state): State<AppState>,
    _admin: AdminAccess,
    Query(query): Query<ListQuery>,
) -> AppResult<impl IntoResponse> {
    let use_cases = &app_state.waitlist_use_cases;

    let summary = if query.include_entries {
        let listing = use_cases.list_entries().await?;
        WaitlistSummary {
            success: true,
            count: listing.count,
            timestamp: Utc::now(),
            entries: Some(listing.entries),
        }
    } else {
        WaitlistSummary {
            success: true,
            count: use_cases.count_entries().await,
            timestamp: Utc::now(),
            entries: None,
        }
    };

    Ok(Json(summary))
}

/// Operator/API entry point.
async fn add_to_waitlist(
    State(app_state): State<AppState>,
    body: Result<Json<SignupPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    signup(&app_state, json_body(body)?, SignupChannel::Api).await
}

/// Landing page form entry point.
async fn subscribe(
    State(app_state): State<AppState>,
    body: Result<Json<SignupPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    signup(&app_state, json_body(body)?, SignupChannel::Website).await
}

async fn signup(
    app_state: &AppState,
    payload: SignupPayload,
    channel: SignupChannel,
) -> AppResult<Json<SubscribeOutcome>> {
    let email = required_email(payload.email)?;
    let user_type = optional_text(payload.user_type);

    let outcome = app_state
        .waitlist_use_cases
        .subscribe(&email, user_type.as_deref(), channel)
        .await?;

    Ok(Json(outcome))
}

async fn remove_from_waitlist(
    State(app_state): State<AppState>,
    _admin: AdminAccess,
    body: Result<Json<RemovePayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let email = required_email(json_body(body)?.email)?;

    app_state.waitlist_use_cases.remove_entry(&email).await?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Email removed from waitlist",
    }))
}
