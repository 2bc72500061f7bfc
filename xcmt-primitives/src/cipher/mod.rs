#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Block Ciphers
//!
//! The keyed single-block encryption capability CMAC, XAES-256-GCM and
//! KC-XAES-256-GCM are built on. Constructions take the cipher as a type
//! parameter; [`aes256::Aes256`] is the production implementation.

pub mod aes256;

pub use aes256::Aes256;

use crate::error::Result;

/// Block length in bytes for every supported cipher (128-bit block)
pub const BLOCK_LEN: usize = 16;

/// One cipher block
pub type Block = [u8; BLOCK_LEN];

/// A keyed 128-bit block cipher, encrypt direction only.
pub trait BlockCipher: Sized + Send + Sync {
    /// Key length in bytes
    const KEY_LEN: usize;

    /// Expand `key` into a cipher instance.
    ///
    /// # Errors
    /// Returns `InvalidKeyLength` if `key` is not `KEY_LEN` bytes.
    fn new(key: &[u8]) -> Result<Self>;

    /// Encrypt a single block.
    fn encrypt_block(&self, block: &Block) -> Block;
}
