//! Concurrency and Thread Safety Tests for xcmt-primitives
//!
//! Keyed instances are immutable after construction, so one instance can be
//! shared across threads and every thread must observe the same results.
//!
//! Test coverage:
//! - Shared CMAC and KC-XAES-256-GCM instances across OS threads
//! - Rayon parallel iterator compatibility
//! - Parallel PBKDF2 blocks under concurrent callers

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use rayon::prelude::*;
use std::sync::Arc;
use std::thread;
use xcmt_primitives::aead::KcXAes256Gcm;
use xcmt_primitives::kdf::Pbkdf2;
use xcmt_primitives::mac::{Cmac256, HmacSha256};

const NUM_THREADS: usize = 8;

#[test]
fn test_shared_cmac_is_deterministic_across_threads() {
    let cmac = Arc::new(Cmac256::new(&[0x2bu8; 32]).expect("valid key"));
    let expected = cmac.digest(b"shared message").unwrap();

    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|_| {
            let cmac = Arc::clone(&cmac);
            thread::spawn(move || cmac.digest(b"shared message").unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("thread should not panic"), expected);
    }
}

#[test]
fn test_shared_kc_cipher_concurrent_round_trips() {
    let cipher = Arc::new(KcXAes256Gcm::new(&[0x44u8; 32]).unwrap());

    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|i| {
            let cipher = Arc::clone(&cipher);
            thread::spawn(move || {
                let nonce = KcXAes256Gcm::generate_nonce();
                let message = format!("message from thread {i}").into_bytes();
                let ct = cipher.encrypt(&nonce, &message, None).unwrap();
                let pt = cipher.decrypt(&nonce, &ct, None).unwrap();
                assert_eq!(pt, message);
                ct
            })
        })
        .collect();

    let mut ciphertexts: Vec<Vec<u8>> =
        handles.into_iter().map(|h| h.join().expect("thread should not panic")).collect();
    ciphertexts.sort();
    ciphertexts.dedup();
    assert_eq!(ciphertexts.len(), NUM_THREADS, "random nonces give distinct ciphertexts");
}

#[test]
fn test_rayon_parallel_encryption() {
    let cipher = KcXAes256Gcm::new(&[0x45u8; 32]).unwrap();
    let nonces: Vec<[u8; 24]> = (0..64u8).map(|i| [i; 24]).collect();

    let ciphertexts: Vec<Vec<u8>> =
        nonces.par_iter().map(|nonce| cipher.encrypt(nonce, b"payload", None).unwrap()).collect();

    for (nonce, ct) in nonces.iter().zip(&ciphertexts) {
        assert_eq!(cipher.encrypt(nonce, b"payload", None).unwrap(), *ct);
    }
}

#[test]
fn test_parallel_pbkdf2_under_concurrent_callers() {
    let expected = Pbkdf2::new(HmacSha256::new()).digest(b"pw", b"salt", 50, 160 * 8).unwrap();

    let results: Vec<bool> = (0..NUM_THREADS)
        .into_par_iter()
        .map(|_| {
            let pbkdf2 = Pbkdf2::new(HmacSha256::new()).with_parallel(true);
            pbkdf2.digest(b"pw", b"salt", 50, 160 * 8).unwrap() == expected
        })
        .collect();

    assert!(results.into_iter().all(|ok| ok));
}
