use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("{field} cannot be blank")]
    BlankField { field: String },

    #[error("{field} must be a number, got '{value}'")]
    InvalidNumber { field: String, value: String },

    #[error("{field} cannot be negative")]
    Negative { field: String },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: u32, max: u32 },

    #[error("{field} must be a YYYY-MM-DD date, got '{value}'")]
    InvalidDate { field: String, value: String },

    #[error("Could not reach backend: {0}")]
    Transport(String),

    #[error("Server error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Login failed: {0}")]
    AuthFailed(String),

    #[error("Google login is not configured (set GOOGLE_CLIENT_ID)")]
    LoginDisabled,

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type PlannerResult<T> = Result<T, PlannerError>;
