use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use secrecy::ExposeSecret;
use sha2::{Digest, Sha256};

use crate::{adapters::http::app_state::AppState, app_error::AppError};

/// Extractor guarding the operator routes.
///
/// When `ADMIN_TOKEN` is configured the request must carry
/// `Authorization: Bearer <token>`; otherwise the routes are open.
#[derive(Debug, Clone, Copy)]
pub struct AdminAccess;

impl FromRequestParts<AppState> for AdminAccess {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        app_state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = &app_state.config.admin_token else {
            return Ok(AdminAccess);
        };

        let provided = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .ok_or(AppError::Unauthorized)?;

        // Fixed-length digests, never the raw tokens.
        if hash_token(provided) != hash_token(expected.expose_secret()) {
            tracing::warn!("Rejected admin request with wrong token");
            return Err(AppError::Unauthorized);
        }

        Ok(AdminAccess)
    }
}

/// Hash a token using SHA-256, returning hex-encoded hash.
fn hash_token(raw: &str) -> String {
    hex::encode(Sha256::digest(raw.as_bytes()))
}
