#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! AES-256 single-block encryption via the RustCrypto `aes` crate.

use ::aes::cipher::{BlockEncrypt, KeyInit};

use super::{Block, BlockCipher};
use crate::error::{Error, Result};

/// AES-256 key length in bytes
pub const AES_256_KEY_LEN: usize = 32;

/// AES-256 with an expanded key schedule.
#[derive(Clone)]
pub struct Aes256 {
    cipher: ::aes::Aes256,
}

impl std::fmt::Debug for Aes256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aes256").finish_non_exhaustive()
    }
}

impl BlockCipher for Aes256 {
    const KEY_LEN: usize = AES_256_KEY_LEN;

    fn new(key: &[u8]) -> Result<Self> {
        if key.len() != Self::KEY_LEN {
            return Err(Error::InvalidKeyLength { expected: Self::KEY_LEN, actual: key.len() });
        }

        let cipher = ::aes::Aes256::new_from_slice(key)
            .map_err(|_e| Error::InvalidKeyLength { expected: Self::KEY_LEN, actual: key.len() })?;
        Ok(Self { cipher })
    }

    fn encrypt_block(&self, block: &Block) -> Block {
        let mut out = *block;
        self.cipher.encrypt_block((&mut out).into());
        out
    }
}
