#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Authenticated Encryption with Additional Data (AEAD)
//!
//! ## AEAD Schemes
//!
//! - **AES-256-GCM**: the underlying AEAD primitive (NIST SP 800-38D), via aws-lc-rs
//! - **XAES-256-GCM**: AES-256-GCM with a 24-byte nonce, extended through
//!   CMAC-derived per-nonce subkeys (C2SP XAES-256-GCM)
//! - **KC-XAES-256-GCM**: XAES-256-GCM with a 32-byte key-commitment tag
//!   appended to every ciphertext
//!
//! ## AEAD Security Notes
//!
//! - **Nonce Reuse**: NEVER reuse a nonce with the same key - this breaks security
//! - **Random Nonces**: 24-byte XAES nonces are safe to generate at random
//! - **Tag Verification**: Decryption never returns plaintext whose tag or
//!   commitment failed to verify
//! - **Side Channels**: Commitment verification is constant-time

pub mod aes_gcm;
pub mod kc_xaes_256_gcm;
pub mod xaes_256_gcm;

pub use self::aes_gcm::AwsLcAes256Gcm;
pub use self::kc_xaes_256_gcm::KcXAes256Gcm;
pub use self::xaes_256_gcm::XAes256Gcm;

use crate::error::Result;

/// AES-256-GCM key length
pub const KEY_LEN: usize = 32;

/// AES-GCM nonce length
pub const NONCE_LEN: usize = 12;

/// AEAD authentication tag length
pub const TAG_LEN: usize = 16;

/// XAES-256-GCM extended nonce length
pub const XNONCE_LEN: usize = 24;

/// KC-XAES-256-GCM key-commitment tag length
pub const COMMITMENT_LEN: usize = 32;

/// Nonce type for the underlying AEAD
pub type Nonce = [u8; NONCE_LEN];

/// Extended nonce type for XAES-256-GCM
pub type XNonce = [u8; XNONCE_LEN];

/// Key-commitment tag type
pub type Commitment = [u8; COMMITMENT_LEN];

/// AES-256-GCM capability the XAES constructions delegate to.
///
/// Ciphertexts carry the tag appended (`ciphertext || tag`).
pub trait AeadPrimitive: Send + Sync {
    /// Encrypt and authenticate `plaintext`, binding `aad`.
    ///
    /// # Errors
    /// Returns `EncryptionFailed` if the backend rejects the request.
    fn seal(&self, key: &[u8; KEY_LEN], nonce: &Nonce, plaintext: &[u8], aad: &[u8])
        -> Result<Vec<u8>>;

    /// Verify and decrypt `ciphertext || tag`.
    ///
    /// # Errors
    /// Returns `AuthenticationFailure` if the tag does not verify.
    fn open(&self, key: &[u8; KEY_LEN], nonce: &Nonce, ciphertext: &[u8], aad: &[u8])
        -> Result<Vec<u8>>;
}
