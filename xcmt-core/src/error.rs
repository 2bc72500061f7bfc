//! Error types for XCMT Core operations.
//!
//! Wraps the construction-level errors of `xcmt-primitives` and adds the
//! failures that only exist at the public operation surface: configuration
//! validation, resource limits and start-up self-tests.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

use thiserror::Error;
use xcmt_primitives::{Error as PrimitiveError, ErrorSeverity};

/// Errors that can occur during XCMT Core operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A construction in `xcmt-primitives` rejected the request.
    #[error(transparent)]
    Primitive(#[from] PrimitiveError),

    /// Configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Resource limit has been exceeded.
    #[error("Resource limit exceeded: requested {requested}, limit {limit} ({what})")]
    ResourceExceeded {
        /// Which limit was hit
        what: &'static str,
        /// Requested amount
        requested: u64,
        /// Configured limit
        limit: u64,
    },

    /// A power-up known-answer test did not reproduce its vector.
    #[error("Self-test failed: {component}. Status: {status}")]
    SelfTestFailed {
        /// Component that failed the self-test.
        component: String,
        /// Status or details of the failure.
        status: String,
    },
}

impl CoreError {
    /// Classify this error, deferring to the primitive error when wrapped.
    #[must_use]
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::Primitive(err) => err.severity(),
            CoreError::SelfTestFailed { .. } => ErrorSeverity::Critical,
            CoreError::ConfigurationError(_) | CoreError::ResourceExceeded { .. } => {
                ErrorSeverity::Medium
            }
        }
    }

    /// Whether this error reports tampered or foreign ciphertext.
    #[must_use]
    pub fn is_integrity_failure(&self) -> bool {
        matches!(self, CoreError::Primitive(err) if err.is_integrity_failure())
    }
}

/// Result type alias for XCMT Core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
