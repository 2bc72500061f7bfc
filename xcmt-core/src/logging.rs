//! # XCMT Logging Utilities
//!
//! Structured logging with tracing that never writes key, password or
//! plaintext bytes. Operations report lengths; byte buffers go through
//! [`sanitize_data`] before they reach a log line.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use xcmt_core::logging::{init_tracing, sanitize_data};
//!
//! // Sets the global tracing subscriber, call once per process
//! init_tracing().expect("Failed to init tracing");
//!
//! let key_data = b"sensitive_key_material";
//! tracing::info!("Key operation completed: {}", sanitize_data(key_data));
//! ```

use std::fmt;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use xcmt_primitives::{HashFunction, Sha256};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "xcmt=info";

/// Inputs up to this length are shown by length only.
const FINGERPRINT_THRESHOLD: usize = 32;

/// Initialize tracing with an environment filter and compact output.
///
/// Honours `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
///
/// # Errors
///
/// Returns an error if a global subscriber has already been installed.
pub fn init_tracing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .compact(),
        )
        .try_init()?;

    info!("XCMT logging initialized");
    Ok(())
}

/// Wrap bytes so that only their length (and, for long inputs, a short
/// SHA-256 fingerprint) is ever formatted.
#[must_use]
pub fn sanitize_data(data: &[u8]) -> SanitizedData<'_> {
    SanitizedData(data)
}

/// Display wrapper returned by [`sanitize_data`]
pub struct SanitizedData<'a>(&'a [u8]);

impl fmt::Display for SanitizedData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.len() <= FINGERPRINT_THRESHOLD {
            write!(f, "[{} bytes]", self.0.len())
        } else {
            let digest = Sha256::digest(self.0);
            let prefix = digest.get(..8).unwrap_or(digest.as_slice());
            write!(f, "[{} bytes, fingerprint: {}]", self.0.len(), hex::encode(prefix))
        }
    }
}

impl fmt::Debug for SanitizedData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Log the start of a one-shot operation at TRACE level.
#[macro_export]
macro_rules! log_crypto_operation_start {
    ($op:expr, $($field:tt)*) => {
        tracing::trace!(
            target: "crypto::operation",
            operation = $op,
            phase = "start",
            $($field)*
        );
    };
    ($op:expr) => {
        tracing::trace!(target: "crypto::operation", operation = $op, phase = "start");
    };
}

/// Log the completion of a one-shot operation at TRACE level.
#[macro_export]
macro_rules! log_crypto_operation_complete {
    ($op:expr, $($field:tt)*) => {
        tracing::trace!(
            target: "crypto::operation",
            operation = $op,
            phase = "complete",
            $($field)*
        );
    };
    ($op:expr) => {
        tracing::trace!(target: "crypto::operation", operation = $op, phase = "complete");
    };
}

/// Log a failed one-shot operation.
///
/// Integrity failures are logged at WARN, everything else at ERROR.
#[macro_export]
macro_rules! log_crypto_operation_error {
    ($op:expr, $error:expr) => {
        if $error.is_integrity_failure() {
            tracing::warn!(
                target: "crypto::operation",
                operation = $op,
                error = %$error,
                phase = "error",
            );
        } else {
            tracing::error!(
                target: "crypto::operation",
                operation = $op,
                error = %$error,
                phase = "error",
            );
        }
    };
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Tests use unwrap for simplicity
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_data_small() {
        assert_eq!(sanitize_data(b"short").to_string(), "[5 bytes]");
        assert_eq!(sanitize_data(&[]).to_string(), "[0 bytes]");
        assert_eq!(sanitize_data(&[0u8; 32]).to_string(), "[32 bytes]");
    }

    #[test]
    fn test_sanitize_data_large() {
        let data = vec![0u8; 100];
        let output = sanitize_data(&data).to_string();
        assert!(output.starts_with("[100 bytes, fingerprint: "));

        let fingerprint = output.trim_start_matches("[100 bytes, fingerprint: ").trim_end_matches(']');
        assert_eq!(fingerprint.len(), 16);
        assert!(fingerprint.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_sanitize_data_never_echoes_content() {
        let secret = b"correct horse battery staple, do not log me";
        let output = format!("{:?}", sanitize_data(secret));
        assert!(!output.contains("horse"));
        assert!(!output.contains(&hex::encode(&secret[..8])));
    }

    #[test]
    fn test_fingerprint_distinguishes_inputs() {
        let a = sanitize_data(&[1u8; 64]).to_string();
        let b = sanitize_data(&[2u8; 64]).to_string();
        assert_ne!(a, b);
    }
}
