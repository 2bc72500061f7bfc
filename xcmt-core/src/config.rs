//! Configuration for the one-shot operations.
//!
//! Bounds the work a single call may do: message sizes for the AEAD
//! operations and the PBKDF2 iteration count. The plain operations run with
//! [`CoreConfig::default`]; the `_with_config` variants take an explicit one.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

use crate::error::{CoreError, Result};

/// Default upper bound on plaintext and ciphertext sizes, 100 MiB.
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 100 * 1024 * 1024;

/// Default upper bound on PBKDF2 iterations.
pub const DEFAULT_MAX_PBKDF2_ITERATIONS: u32 = 10_000_000;

/// Core configuration settings.
///
/// # Examples
/// ```rust
/// use xcmt_core::config::CoreConfig;
///
/// let config = CoreConfig::new()
///     .with_max_encryption_size(1 << 20)
///     .with_parallel_pbkdf2(false)
///     .build()
///     .expect("Failed to build config");
///
/// assert_eq!(config.max_encryption_size, 1 << 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// Largest plaintext accepted by an encrypt operation, in bytes.
    ///
    /// Default: 100 MiB
    pub max_encryption_size: usize,

    /// Largest ciphertext accepted by a decrypt operation, in bytes.
    ///
    /// Default: 100 MiB
    pub max_decryption_size: usize,

    /// Largest PBKDF2 iteration count accepted.
    ///
    /// Default: 10,000,000
    pub max_pbkdf2_iterations: u32,

    /// Whether PBKDF2 output blocks are computed on the rayon pool.
    ///
    /// Only matters when more than one output block is requested.
    /// Default: `true`
    pub parallel_pbkdf2: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            max_encryption_size: DEFAULT_MAX_MESSAGE_SIZE,
            max_decryption_size: DEFAULT_MAX_MESSAGE_SIZE,
            max_pbkdf2_iterations: DEFAULT_MAX_PBKDF2_ITERATIONS,
            parallel_pbkdf2: true,
        }
    }
}

impl CoreConfig {
    /// Create a new configuration with the default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the encryption size limit and return self for method chaining.
    #[must_use]
    pub fn with_max_encryption_size(mut self, bytes: usize) -> Self {
        self.max_encryption_size = bytes;
        self
    }

    /// Set the decryption size limit and return self for method chaining.
    #[must_use]
    pub fn with_max_decryption_size(mut self, bytes: usize) -> Self {
        self.max_decryption_size = bytes;
        self
    }

    /// Set the PBKDF2 iteration limit and return self for method chaining.
    #[must_use]
    pub fn with_max_pbkdf2_iterations(mut self, iterations: u32) -> Self {
        self.max_pbkdf2_iterations = iterations;
        self
    }

    /// Enable or disable parallel PBKDF2 blocks and return self for method chaining.
    #[must_use]
    pub fn with_parallel_pbkdf2(mut self, enabled: bool) -> Self {
        self.parallel_pbkdf2 = enabled;
        self
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if any limit is zero.
    pub fn build(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Validates the configuration settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if any limit is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_encryption_size == 0 {
            return Err(CoreError::ConfigurationError(
                "max_encryption_size must be greater than zero".to_string(),
            ));
        }

        if self.max_decryption_size == 0 {
            return Err(CoreError::ConfigurationError(
                "max_decryption_size must be greater than zero".to_string(),
            ));
        }

        if self.max_pbkdf2_iterations == 0 {
            return Err(CoreError::ConfigurationError(
                "max_pbkdf2_iterations must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Validates that a plaintext fits the encryption limit.
    ///
    /// # Errors
    /// Returns `ResourceExceeded` if `size` is above `max_encryption_size`.
    pub fn validate_encryption_size(&self, size: usize) -> Result<()> {
        check_limit("encryption size", size as u64, self.max_encryption_size as u64)
    }

    /// Validates that a ciphertext fits the decryption limit.
    ///
    /// # Errors
    /// Returns `ResourceExceeded` if `size` is above `max_decryption_size`.
    pub fn validate_decryption_size(&self, size: usize) -> Result<()> {
        check_limit("decryption size", size as u64, self.max_decryption_size as u64)
    }

    /// Validates a PBKDF2 iteration count against the configured limit.
    ///
    /// # Errors
    /// Returns `ResourceExceeded` if `iterations` is above `max_pbkdf2_iterations`.
    pub fn validate_pbkdf2_iterations(&self, iterations: u32) -> Result<()> {
        check_limit(
            "pbkdf2 iterations",
            u64::from(iterations),
            u64::from(self.max_pbkdf2_iterations),
        )
    }
}

fn check_limit(what: &'static str, requested: u64, limit: u64) -> Result<()> {
    if requested > limit {
        return Err(CoreError::ResourceExceeded { what, requested, limit });
    }
    Ok(())
}
