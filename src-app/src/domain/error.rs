//! Shell errors
//!
//! Every failure below the session boundary is one of these. The session
//! catches them and degrades to the template, an empty gallery or a logged
//! save failure.

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("invalid document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("remote store returned {status}: {body}")]
    RemoteStatus { status: u16, body: String },
    #[error("timed out after {0} ms")]
    Timeout(u64),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("database not initialized")]
    NotInitialized,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = StoreError::RemoteStatus {
            status: 401,
            body: "bad key".to_string(),
        };
        assert_eq!(err.to_string(), "remote store returned 401: bad key");
        assert_eq!(StoreError::Timeout(5000).to_string(), "timed out after 5000 ms");
    }

    #[test]
    fn test_json_conversion() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: StoreError = parse.unwrap_err().into();
        assert!(matches!(err, StoreError::Json(_)));
    }
}
