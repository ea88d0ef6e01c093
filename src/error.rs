// HTTP API error types as seen from the client side
use serde_json::Value;
use thiserror::Error;

/// Custom status the engine uses to signal a forced password change.
pub const STATUS_PASSWORD_CHANGE_REQUIRED: u16 = 499;

/// A failed API call, classified by what the caller can do about it
#[derive(Error, Debug)]
pub enum ApiError {
    // No response at all: DNS, refused connection, timeout
    #[error("Network error, check your connection or contact an administrator: {0}")]
    Network(String),

    // 400 Bad Request
    #[error("Operation failed: {0}")]
    Validation(String),

    // 409 Conflict
    #[error("Operation failed: {0}")]
    Conflict(String),

    // 401 on any call but login
    #[error("Session expired, please log in again")]
    SessionExpired,

    // 401 on the login call
    #[error("Login failed: {0}")]
    LoginFailed(String),

    // 403 Forbidden
    #[error("Permission denied: {0}")]
    Forbidden(String),

    // 404 Not Found
    #[error("Resource not found: {0}")]
    NotFound(String),

    // 499, passed through with the body intact
    #[error("Password change required: {message}")]
    PasswordChangeRequired { message: String, body: Value },

    // 500 Internal Server Error
    #[error("Internal server error: {0}")]
    Server(String),

    #[error("Request failed: {message} (status: {status})")]
    Unexpected { status: u16, message: String },

    #[error("Could not decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a non-success response. `is_login` marks the login call.
    pub fn from_status(status: u16, message: String, body: Value, is_login: bool) -> Self {
        match status {
            400 => ApiError::Validation(message),
            409 => ApiError::Conflict(message),
            401 if is_login => ApiError::LoginFailed(message),
            401 => ApiError::SessionExpired,
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound(message),
            STATUS_PASSWORD_CHANGE_REQUIRED => ApiError::PasswordChangeRequired { message, body },
            500 => ApiError::Server(message),
            status => ApiError::Unexpected { status, message },
        }
    }

    /// HTTP status code, if the server answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Network(_) | ApiError::Decode(_) => None,
            ApiError::Validation(_) => Some(400),
            ApiError::Conflict(_) => Some(409),
            ApiError::SessionExpired | ApiError::LoginFailed(_) => Some(401),
            ApiError::Forbidden(_) => Some(403),
            ApiError::NotFound(_) => Some(404),
            ApiError::PasswordChangeRequired { .. } => Some(STATUS_PASSWORD_CHANGE_REQUIRED),
            ApiError::Server(_) => Some(500),
            ApiError::Unexpected { status, .. } => Some(*status),
        }
    }

    /// Server-supplied message, without the category prefix
    pub fn message(&self) -> &str {
        match self {
            ApiError::Network(m)
            | ApiError::Validation(m)
            | ApiError::Conflict(m)
            | ApiError::LoginFailed(m)
            | ApiError::Forbidden(m)
            | ApiError::NotFound(m)
            | ApiError::Server(m)
            | ApiError::Decode(m) => m,
            ApiError::PasswordChangeRequired { message, .. } | ApiError::Unexpected { message, .. } => {
                message
            }
            ApiError::SessionExpired => "Session expired, please log in again",
        }
    }

    /// Get error code for programmatic handling (CLI JSON output)
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Network(_) => "NETWORK_ERROR",
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::SessionExpired => "SESSION_EXPIRED",
            ApiError::LoginFailed(_) => "LOGIN_FAILED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::PasswordChangeRequired { .. } => "PASSWORD_CHANGE_REQUIRED",
            ApiError::Server(_) => "INTERNAL_SERVER_ERROR",
            ApiError::Unexpected { .. } => "REQUEST_FAILED",
            ApiError::Decode(_) => "DECODE_ERROR",
        }
    }

    /// Whether the global handler surfaces this error to the user.
    ///
    /// 499 is left to the caller, decode failures are programming errors
    /// and only get logged.
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, ApiError::PasswordChangeRequired { .. } | ApiError::Decode(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
