//! Typed error hierarchy for the BugPilot client.
//!
//! Two top-level enums cover the two subsystems:
//! - `ApiError`: REST client failures (transport, status, decoding, auth)
//! - `BoardError`: board store failures that escape to the page level
//!
//! A failed ticket move is not an error here: the store absorbs it and
//! reports it through `MoveOutcome` and its error signal instead.

use thiserror::Error;

/// Errors from the REST client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not signed in. Run 'bugpilot login' first.")]
    MissingToken,

    #[error("Authentication token expired or invalid. Signed out.")]
    Unauthorized,

    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl ApiError {
    /// HTTP status for server-side rejections, `None` for local or transport failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Unauthorized => Some(401),
            _ => None,
        }
    }
}

/// Errors from the board store that callers must handle.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Ticket {id} not found on the board")]
    ItemNotFound { id: String },

    #[error("{message}")]
    FetchFailed {
        message: String,
        #[source]
        source: ApiError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_carries_code_and_message() {
        let err = ApiError::Status {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.status(), Some(500));
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn unauthorized_maps_to_401() {
        assert_eq!(ApiError::Unauthorized.status(), Some(401));
        assert_eq!(ApiError::MissingToken.status(), None);
    }

    #[test]
    fn io_error_carries_path() {
        use std::path::PathBuf;
        let path = PathBuf::from("/tmp/shot.png");
        let err = ApiError::Io {
            path: path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        match &err {
            ApiError::Io { path: p, source } => {
                assert_eq!(p, &path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            _ => panic!("Expected Io"),
        }
    }

    #[test]
    fn fetch_failed_displays_user_message() {
        let err = BoardError::FetchFailed {
            message: "Failed to load tickets. Please try again.".to_string(),
            source: ApiError::MissingToken,
        };
        assert_eq!(err.to_string(), "Failed to load tickets. Please try again.");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn all_error_types_implement_std_error_trait() {
        fn assert_std_error<E: std::error::Error>(_: &E) {}
        assert_std_error(&ApiError::MissingToken);
        assert_std_error(&BoardError::ItemNotFound { id: "t1".into() });
    }
}
