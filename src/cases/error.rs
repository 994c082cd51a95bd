use std::error::Error;
use std::fmt;

use crate::errors::ServerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseErrorKind {
    /// The case does not exist or belongs to someone else.
    NotFound,
    /// The request itself was refused (e.g. a non-terminal status).
    Rejected,
    /// The store failed.
    Unavailable,
}

/// The one error kind that crosses from the case service to the map.
///
/// `message` is safe to show to the user; store details only go to the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseServiceError {
    pub kind: CaseErrorKind,
    pub message: String,
}

impl CaseServiceError {
    pub fn new(kind: CaseErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Normalizes a store error, logging the detail under `action`.
    pub fn from_server(action: &str, err: ServerError) -> Self {
        match err {
            ServerError::NotFound => Self::new(
                CaseErrorKind::NotFound,
                "Case not found, or you are not its owner.",
            ),
            ServerError::BadRequest(msg) => Self::new(CaseErrorKind::Rejected, msg),
            other => {
                log::error!("{action} failed: {other}");
                Self::new(
                    CaseErrorKind::Unavailable,
                    format!("Could not {action}. Please try again."),
                )
            }
        }
    }
}

impl fmt::Display for CaseServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for CaseServiceError {}
