//! Collaborator error types.

use thiserror::Error;

/// Errors from a collaborator call.
///
/// `Transport` means the collaborator was unreachable (server fault,
/// surfaces as 500). `Status` means it answered with a status the step
/// treats as failure; that status propagates to the HTTP caller.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The collaborator could not be reached.
    #[error("{service} unreachable: {message}")]
    Transport {
        service: &'static str,
        message: String,
    },

    /// The collaborator returned an unexpected status.
    #[error("{message}")]
    Status {
        service: &'static str,
        status: u16,
        message: String,
    },
}

impl ClientError {
    /// Wraps a reqwest transport failure for the named collaborator.
    pub fn transport(service: &'static str, err: reqwest::Error) -> Self {
        Self::Transport {
            service,
            message: err.to_string(),
        }
    }

    /// The upstream status to propagate, if this is a status failure.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { .. } => None,
        }
    }
}
