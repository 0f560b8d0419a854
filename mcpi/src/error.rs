//! Error types for mcpi

use std::net::SocketAddr;
use thiserror::Error;

/// Errors surfaced by the session and coordinator handles
#[derive(Debug, Error)]
pub enum McpiError {
    #[error("Coordinator channel closed")]
    CoordinatorClosed,

    #[error("Coordinator shut down before replying")]
    NoReply,

    #[error("Session already terminated")]
    AlreadyTerminated,

    #[error("Readiness signal dropped before firing")]
    ReadySignalDropped,

    #[error("Failed to bind snapshot server on {addr}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Snapshot server failed on {addr}")]
    Serve {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, McpiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_error_message() {
        let err = McpiError::Bind {
            addr: "0.0.0.0:80".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };

        let msg = err.to_string();
        assert!(msg.contains("0.0.0.0:80"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_terminated_message() {
        assert_eq!(McpiError::AlreadyTerminated.to_string(), "Session already terminated");
    }
}
