// Copyright (c) 2025 Spendbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Salted password digests.
//!
//! A stored digest is the base64 encoding of `salt || sha256(salt || password)`
//! with a fixed 16-byte salt. The salt is drawn fresh on every call, so hashing
//! the same password twice yields two different strings that both verify.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use rand::Rng;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

const SALT_LEN: usize = 16;

/// Digest a password under a fresh random salt.
pub fn hash(plaintext: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill(&mut salt);
    let digest = salted_digest(&salt, plaintext);
    let mut raw = Vec::with_capacity(SALT_LEN + digest.len());
    raw.extend_from_slice(&salt);
    raw.extend_from_slice(&digest);
    B64.encode(raw)
}

/// Check a password against a stored digest. Malformed or undersized input
/// verifies false rather than erroring.
pub fn verify(plaintext: &str, stored: &str) -> bool {
    let Ok(raw) = B64.decode(stored) else {
        return false;
    };
    if raw.len() <= SALT_LEN {
        return false;
    }
    let (salt, expected) = raw.split_at(SALT_LEN);
    let actual = salted_digest(salt, plaintext);
    bool::from(actual.as_slice().ct_eq(expected))
}

fn salted_digest(salt: &[u8], plaintext: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(plaintext.as_bytes());
    hasher.finalize().into()
}
