#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! XAES-256-GCM
//!
//! AES-256-GCM with a 24-byte nonce `N = U || V` (C2SP XAES-256-GCM). Each
//! nonce selects its own AES-256-GCM key:
//!
//! ```text
//! Kx = CMAC(K, 00 01 58 00 || U) || CMAC(K, 00 02 58 00 || U)
//! XAES-256-GCM(K, N, P, A) = AES-256-GCM(Kx, V, P, A)
//! ```
//!
//! Both CMAC inputs are exactly one block, so each is computed as
//! `AES(K, M XOR K1)` without running the chaining loop.

use crate::aead::{AeadPrimitive, AwsLcAes256Gcm, Nonce, XNonce, KEY_LEN, NONCE_LEN, XNONCE_LEN};
use crate::cipher::{Block, BLOCK_LEN};
use crate::error::{Error, Result};
use crate::mac::cmac::Cmac256;
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::instrument;
use zeroize::Zeroizing;

/// Domain separator of the first subkey half: `0x00 0x01 'X' 0x00`
const SUBKEY_PREFIX_1: [u8; 4] = [0x00, 0x01, 0x58, 0x00];

/// Domain separator of the second subkey half: `0x00 0x02 'X' 0x00`
const SUBKEY_PREFIX_2: [u8; 4] = [0x00, 0x02, 0x58, 0x00];

/// XAES-256-GCM keyed with a 32-byte key.
///
/// The CMAC subkeys are derived once in [`XAes256Gcm::new`]; the instance is
/// immutable afterwards and may be shared across threads.
///
/// # Example
///
/// ```rust
/// use xcmt_primitives::aead::XAes256Gcm;
///
/// let cipher = XAes256Gcm::new(&[0x01u8; 32]).unwrap();
/// let nonce = XAes256Gcm::generate_nonce();
/// let ciphertext = cipher.encrypt(&nonce, b"secret message", None).unwrap();
/// let plaintext = cipher.decrypt(&nonce, &ciphertext, None).unwrap();
/// assert_eq!(plaintext, b"secret message");
/// ```
#[derive(Debug, Clone)]
pub struct XAes256Gcm<A: AeadPrimitive = AwsLcAes256Gcm> {
    cmac: Cmac256,
    aead: A,
}

impl XAes256Gcm<AwsLcAes256Gcm> {
    /// Key XAES-256-GCM over the aws-lc-rs AES-256-GCM backend.
    ///
    /// # Errors
    /// Returns `InvalidKeyLength` if `key` is not 32 bytes.
    pub fn new(key: &[u8]) -> Result<Self> {
        Self::with_backend(key, AwsLcAes256Gcm)
    }

    /// Generate a random 24-byte nonce.
    #[must_use]
    pub fn generate_nonce() -> XNonce {
        let mut nonce = [0u8; XNONCE_LEN];
        OsRng.fill_bytes(&mut nonce);
        nonce
    }

    /// Generate a random 32-byte key.
    #[must_use]
    pub fn generate_key() -> Zeroizing<[u8; KEY_LEN]> {
        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        OsRng.fill_bytes(key.as_mut_slice());
        key
    }
}

impl<A: AeadPrimitive> XAes256Gcm<A> {
    /// Key XAES-256-GCM over a caller-supplied AES-256-GCM backend.
    ///
    /// # Errors
    /// Returns `InvalidKeyLength` if `key` is not 32 bytes.
    #[instrument(level = "debug", skip(key, aead), fields(key_len = key.len()))]
    pub fn with_backend(key: &[u8], aead: A) -> Result<Self> {
        let cmac = Cmac256::new(key)?;
        Ok(Self { cmac, aead })
    }

    /// Derive the per-nonce AES-256-GCM key `Kx` and sub-nonce `V`.
    ///
    /// # Errors
    /// Returns `InvalidNonceLength` if `nonce` is not 24 bytes.
    pub fn derive_key(&self, nonce: &[u8]) -> Result<(Zeroizing<[u8; KEY_LEN]>, Nonce)> {
        let (prefix, sub_nonce) = split_nonce(nonce)?;

        let mut subkey = Zeroizing::new([0u8; KEY_LEN]);
        let (first, second) = subkey.split_at_mut(BLOCK_LEN);
        first.copy_from_slice(
            &self.cmac.digest_complete_block(&domain_block(&SUBKEY_PREFIX_1, &prefix)),
        );
        second.copy_from_slice(
            &self.cmac.digest_complete_block(&domain_block(&SUBKEY_PREFIX_2, &prefix)),
        );

        Ok((subkey, sub_nonce))
    }

    /// Encrypt `plaintext`, returning `ciphertext || tag`.
    ///
    /// # Errors
    /// Returns `InvalidNonceLength` for a nonce other than 24 bytes, or
    /// `EncryptionFailed` if the backend fails.
    #[instrument(level = "debug", skip(self, nonce, plaintext, aad), fields(plaintext_len = plaintext.len(), has_aad = aad.is_some()))]
    pub fn encrypt(&self, nonce: &[u8], plaintext: &[u8], aad: Option<&[u8]>) -> Result<Vec<u8>> {
        let (subkey, sub_nonce) = self.derive_key(nonce)?;
        self.aead.seal(&subkey, &sub_nonce, plaintext, aad.unwrap_or_default())
    }

    /// Verify and decrypt `ciphertext || tag`.
    ///
    /// # Errors
    /// Returns `InvalidNonceLength` for a nonce other than 24 bytes, or
    /// `AuthenticationFailure` if the tag does not verify.
    #[instrument(level = "debug", skip(self, nonce, ciphertext, aad), fields(ciphertext_len = ciphertext.len(), has_aad = aad.is_some()))]
    pub fn decrypt(
        &self,
        nonce: &[u8],
        ciphertext: &[u8],
        aad: Option<&[u8]>,
    ) -> Result<Vec<u8>> {
        let (subkey, sub_nonce) = self.derive_key(nonce)?;
        self.aead.open(&subkey, &sub_nonce, ciphertext, aad.unwrap_or_default())
    }

    pub(crate) fn cmac(&self) -> &Cmac256 {
        &self.cmac
    }
}

/// Split a 24-byte nonce into the CMAC input half `U` and the GCM nonce `V`.
pub(crate) fn split_nonce(nonce: &[u8]) -> Result<(Nonce, Nonce)> {
    if nonce.len() != XNONCE_LEN {
        return Err(Error::InvalidNonceLength { expected: XNONCE_LEN, actual: nonce.len() });
    }

    let (u, v) = nonce.split_at(NONCE_LEN);
    let mut prefix = [0u8; NONCE_LEN];
    let mut sub_nonce = [0u8; NONCE_LEN];
    prefix.copy_from_slice(u);
    sub_nonce.copy_from_slice(v);
    Ok((prefix, sub_nonce))
}

/// One block holding a 4-byte domain separator followed by 12 bytes.
pub(crate) fn domain_block(separator: &[u8; 4], data: &[u8; NONCE_LEN]) -> Block {
    let mut block = [0u8; BLOCK_LEN];
    let (head, tail) = block.split_at_mut(separator.len());
    head.copy_from_slice(separator);
    tail.copy_from_slice(data);
    block
}

/// Encrypt with XAES-256-GCM in one call.
///
/// # Errors
/// Returns an error if the key or nonce length is wrong.
pub fn encrypt(key: &[u8], nonce: &[u8], plaintext: &[u8], aad: Option<&[u8]>) -> Result<Vec<u8>> {
    XAes256Gcm::new(key)?.encrypt(nonce, plaintext, aad)
}

/// Decrypt with XAES-256-GCM in one call.
///
/// # Errors
/// Returns an error if the key or nonce length is wrong or authentication fails.
pub fn decrypt(key: &[u8], nonce: &[u8], ciphertext: &[u8], aad: Option<&[u8]>) -> Result<Vec<u8>> {
    XAes256Gcm::new(key)?.decrypt(nonce, ciphertext, aad)
}
