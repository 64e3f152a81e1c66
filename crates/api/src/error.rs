use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Malformed element model: {0}")]
    Model(String),
    #[error("Unknown issue kind: {0}")]
    UnknownIssue(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;
