use crate::app_error::{AppError, ErrorCode};
use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error before it gets converted into a status response.
        tracing::error!(error = ?self, "Request failed");

        let code = self.code();
        match self {
            AppError::InvalidInput(msg) => error_resp(StatusCode::BAD_REQUEST, code, msg),
            AppError::Unauthorized => {
                error_resp(StatusCode::UNAUTHORIZED, code, "Unauthorized".into())
            }
            AppError::NotFound => error_resp(
                StatusCode::NOT_FOUND,
                code,
                "Email not found on the waitlist".into(),
            ),
            AppError::Conflict => error_resp(
                StatusCode::CONFLICT,
                code,
                "Email is already on the waitlist".into(),
            ),
            AppError::BackendUnavailable(_) => error_resp(
                StatusCode::SERVICE_UNAVAILABLE,
                code,
                "Waitlist storage is unavailable".into(),
            ),
            AppError::Database(_) => error_resp(
                StatusCode::INTERNAL_SERVER_ERROR,
                code,
                "Database error".into(),
            ),
            AppError::MirrorNotConfigured => error_resp(
                StatusCode::INTERNAL_SERVER_ERROR,
                code,
                "Google Script URL not configured".into(),
            ),
            AppError::MirrorFailure(_) => error_resp(
                StatusCode::INTERNAL_SERVER_ERROR,
                code,
                "Failed to save email to Google Sheet".into(),
            ),
            AppError::Internal(_) => error_resp(
                StatusCode::INTERNAL_SERVER_ERROR,
                code,
                "Internal error".into(),
            ),
        }
    }
}

fn error_resp(status: StatusCode, code: ErrorCode, message: String) -> Response {
    let body = serde_json::json!({
        "success": false,
        "code": code.as_str(),
        "message": message,
    });
    (status, Json(body)).into_response()
}
