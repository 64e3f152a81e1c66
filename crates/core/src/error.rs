use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiscopeError {
    #[error(transparent)]
    Api(#[from] apiscope_api::ApiError),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ApiscopeError>;
