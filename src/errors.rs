// errors.rs
use crate::remote::FetchError;
use thiserror::Error;

/// Errors originating from either the server logic
/// (routing, decoding uploads, etc.) or downstream layers (DB, remote sheets).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request: {0}")]
    BadRequest(String),

    /// The uploaded or fetched file is not a readable spreadsheet.
    #[error("Decode Error: {0}")]
    Decode(String),

    #[error("Fetch Error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Database Error: {0}")]
    DbError(String),

    #[error("Database Error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    /// HTTP status used when this error reaches the router boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::Decode(_) => 422,
            ServerError::Fetch(_) => 502,
            ServerError::DbError(_)
            | ServerError::Sqlite(_)
            | ServerError::Json(_)
            | ServerError::InternalError => 500,
        }
    }
}
