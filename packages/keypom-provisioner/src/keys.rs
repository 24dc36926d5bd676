//! Key material generation and password commitments.

use std::collections::BTreeMap;

use near_crypto::{KeyType, SecretKey};
use sha2::{Digest, Sha256};

/// Generate `count` fresh ed25519 key pairs.
pub fn generate_key_pairs(count: usize) -> Vec<SecretKey> {
    (0..count)
        .map(|_| SecretKey::from_random(KeyType::ED25519))
        .collect()
}

/// Canonical `ed25519:<base58>` strings for a slice of secret keys.
pub fn public_key_strings(keys: &[SecretKey]) -> Vec<String> {
    keys.iter().map(|sk| sk.public_key().to_string()).collect()
}

/// Derive the password commitment stored on the contract for each of the
/// given uses of one key.
///
/// Commitment = `hex(sha256(sha256(base ++ public_key ++ use)))`. The
/// claimer submits the inner hash; the contract hashes it once more and
/// compares against the stored commitment.
pub fn derive_password_commitments(
    public_key: &str,
    uses: &[u32],
    base_password: &str,
) -> BTreeMap<u32, String> {
    uses.iter()
        .map(|use_number| {
            let preimage = format!("{base_password}{public_key}{use_number}");
            let inner: [u8; 32] = Sha256::digest(preimage.as_bytes()).into();
            let outer: [u8; 32] = Sha256::digest(inner).into();
            (*use_number, hex::encode(outer))
        })
        .collect()
}
