use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("A waitlist entry with this email already exists")]
    Conflict,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found")]
    NotFound,

    #[error("Mirror endpoint is not configured")]
    MirrorNotConfigured,

    #[error("Mirror request failed: {0}")]
    MirrorFailure(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Database(_) => ErrorCode::DatabaseError,
            AppError::BackendUnavailable(_) => ErrorCode::BackendUnavailable,
            AppError::Conflict => ErrorCode::Conflict,
            AppError::InvalidInput(_) => ErrorCode::InvalidInput,
            AppError::Unauthorized => ErrorCode::Unauthorized,
            AppError::NotFound => ErrorCode::NotFound,
            AppError::MirrorNotConfigured => ErrorCode::MirrorNotConfigured,
            AppError::MirrorFailure(_) => ErrorCode::MirrorFailure,
            AppError::Internal(_) => ErrorCode::InternalError,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    DatabaseError,
    BackendUnavailable,
    Conflict,
    InvalidInput,
    Unauthorized,
    NotFound,
    MirrorNotConfigured,
    MirrorFailure,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::BackendUnavailable => "BACKEND_UNAVAILABLE",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::MirrorNotConfigured => "MIRROR_NOT_CONFIGURED",
            ErrorCode::MirrorFailure => "MIRROR_FAILURE",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
