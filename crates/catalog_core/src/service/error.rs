//! Service-facing error taxonomy.
//!
//! # Invariants
//! - Every failure is built where it is detected and carries the message
//!   shown at the boundary.
//! - Only storage constraint violations are translated (into `Conflict`),
//!   and only by the operations that expect them.

use crate::repo::store::RepoError;
use log::{error, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failure kinds returned by catalog services.
#[derive(Debug)]
pub enum ServiceError {
    /// Referenced entity id does not exist.
    NotFound(String),
    /// Caller-supplied data fails a precondition.
    InvalidInput(String),
    /// Storage rejected the write because of a uniqueness or integrity rule.
    Conflict(String),
    /// Anything else. `source` holds the storage failure when there is one.
    Unexpected {
        message: String,
        source: Option<RepoError>,
    },
}

impl ServiceError {
    pub(crate) fn not_found(label: &str, id: i64) -> Self {
        Self::NotFound(format!("{label} not found with id {id}"))
    }

    pub(crate) fn unexpected(message: impl Into<String>) -> Self {
        let message = message.into();
        error!("event=service_unexpected module=service status=error error={message}");
        Self::Unexpected {
            message,
            source: None,
        }
    }

    /// Human-readable message carried to the boundary.
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound(message)
            | Self::InvalidInput(message)
            | Self::Conflict(message)
            | Self::Unexpected { message, .. } => message,
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unexpected {
                source: Some(err), ..
            } => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity, id } => Self::not_found(entity, id),
            other => {
                error!("event=service_unexpected module=service status=error error={other}");
                Self::Unexpected {
                    message: other.to_string(),
                    source: Some(other),
                }
            }
        }
    }
}

/// Translates a constraint violation into `Conflict` with `message`; every
/// other repository failure keeps its usual mapping.
pub(crate) fn conflict_on_constraint(err: RepoError, message: &str) -> ServiceError {
    if err.is_constraint() {
        warn!("event=store_conflict module=service status=error message={message} error={err}");
        ServiceError::Conflict(message.to_string())
    } else {
        err.into()
    }
}
