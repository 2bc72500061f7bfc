//! Error types for xcmt-primitives crate.

/// Errors that can occur in cryptographic construction operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A buffer did not match the layout it was decoded against.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Two operands that must have equal length did not.
    #[error("Length mismatch: {left} bytes vs {right} bytes")]
    LengthMismatch {
        /// Length of the left operand
        left: usize,
        /// Length of the right operand
        right: usize,
    },

    /// AEAD tag verification failed during decryption.
    #[error("Authentication tag verification failed")]
    AuthenticationFailure,

    /// Key-commitment tag verification failed during decryption.
    #[error("Key commitment verification failed")]
    CommitmentMismatch,

    /// Key length does not match the primitive.
    #[error("Invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// Nonce length does not match the construction.
    #[error("Invalid nonce length: expected {expected}, got {actual}")]
    InvalidNonceLength {
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// A parameter is outside the range the algorithm defines.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Operation exceeded resource limits.
    #[error("Resource limit exceeded: {0}")]
    ResourceExceeded(String),

    /// The AEAD backend rejected an encryption request.
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),
}

/// How serious a failure is for the caller's integrity guarantees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    /// Informational, no immediate action required
    Low,
    /// Invalid caller input; the operation was refused
    Medium,
    /// Integrity check failed on untrusted data
    High,
    /// The ciphertext may decrypt under a different key
    Critical,
}

impl Error {
    /// Classify this error.
    ///
    /// A commitment failure ranks above a plain AEAD failure: the ciphertext
    /// may be a valid encryption under some other key.
    #[must_use]
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Error::CommitmentMismatch => ErrorSeverity::Critical,
            Error::AuthenticationFailure => ErrorSeverity::High,
            Error::MalformedInput(_)
            | Error::LengthMismatch { .. }
            | Error::InvalidKeyLength { .. }
            | Error::InvalidNonceLength { .. }
            | Error::InvalidParameter(_)
            | Error::ResourceExceeded(_)
            | Error::EncryptionFailed(_) => ErrorSeverity::Medium,
        }
    }

    /// Whether this error reports tampered or foreign ciphertext.
    #[must_use]
    pub fn is_integrity_failure(&self) -> bool {
        matches!(self, Error::AuthenticationFailure | Error::CommitmentMismatch)
    }
}

/// Result type alias for xcmt-primitives operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commitment_mismatch_outranks_authentication_failure() {
        assert!(Error::CommitmentMismatch.severity() > Error::AuthenticationFailure.severity());
        assert_eq!(Error::MalformedInput("x".to_string()).severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn test_integrity_failures() {
        assert!(Error::CommitmentMismatch.is_integrity_failure());
        assert!(Error::AuthenticationFailure.is_integrity_failure());
        assert!(!Error::LengthMismatch { left: 1, right: 2 }.is_integrity_failure());
    }
}
