pub mod google_sheets;
pub mod waitlist;

use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
    response::IntoResponse,
    routing::get,
};
use serde_json::Value;

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
    application::use_cases::waitlist::EMAIL_REQUIRED_MESSAGE,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(waitlist::router())
        .merge(google_sheets::router())
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Unwrap a JSON body, turning extractor rejections into `InvalidInput`.
///
/// A body that parses but has the wrong shape (an array, a string) is
/// treated as a request without an email.
fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    match body {
        Ok(Json(payload)) => Ok(payload),
        Err(JsonRejection::JsonDataError(err)) => {
            tracing::debug!(error = %err, "Request body has the wrong shape");
            Err(AppError::InvalidInput(EMAIL_REQUIRED_MESSAGE.into()))
        }
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected request body");
            Err(AppError::InvalidInput(rejection.body_text()))
        }
    }
}

/// Only a non-blank JSON string counts as an email.
fn required_email(email: Option<Value>) -> AppResult<String> {
    match email {
        Some(Value::String(email)) if !email.trim().is_empty() => Ok(email),
        _ => Err(AppError::InvalidInput(EMAIL_REQUIRED_MESSAGE.into())),
    }
}

/// `null` means absent; any other non-string is kept as text so it fails
/// user type validation instead of disappearing.
fn optional_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}
