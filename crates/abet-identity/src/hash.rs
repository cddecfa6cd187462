// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Identifier hashing — Keccak-256 pseudonymisation of the FAN.
//
// Keccak-256 (the original padding, as used by Ethereum and js-sha3), NOT
// NIST SHA3-256 — the backend keys accounts by this exact digest.

use abet_core::error::{AbetError, Result};
use sha3::{Digest, Keccak256};

/// Compute the pseudonymous account key for a FAN.
///
/// Trims leading/trailing whitespace, hashes the UTF-8 bytes of the trimmed
/// string with Keccak-256, and returns `0x` followed by 64 lowercase hex
/// characters. Deterministic and pure — safe to call from any context.
///
/// Returns `AbetError::EmptyIdentifier` when the trimmed input is empty;
/// callers should have validated already (see [`crate::validate`]).
pub fn fan_hash(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AbetError::EmptyIdentifier);
    }

    let mut hasher = Keccak256::new();
    hasher.update(trimmed.as_bytes());
    Ok(format!("0x{}", hex::encode(hasher.finalize())))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Keccak-256 of the empty input (well-known constant).
    const EMPTY_KECCAK256: &str =
        "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470";

    #[test]
    fn known_value_123456() {
        // Verified against js-sha3's keccak256 — the digest the backend
        // has on file for this FAN.
        assert_eq!(
            fan_hash("123456").unwrap(),
            "0xc888c9ce9e098d5864d3ded6ebcc140a12142263bace3a23a36f9905f12bd64a"
        );
    }

    #[test]
    fn known_value_hello() {
        assert_eq!(
            fan_hash("hello").unwrap(),
            "0x1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8"
        );
    }

    #[test]
    fn keccak_not_sha3_padding() {
        // NIST SHA3-256("") starts a7ffc6f8; original Keccak-256("") starts
        // c5d24601. Hashing the empty input distinguishes the two paddings.
        let mut hasher = Keccak256::new();
        hasher.update(b"");
        assert_eq!(hex::encode(hasher.finalize()), EMPTY_KECCAK256);
    }

    #[test]
    fn whitespace_is_trimmed_before_hashing() {
        assert_eq!(fan_hash(" 123456 ").unwrap(), fan_hash("123456").unwrap());
        assert_eq!(fan_hash("\t123456\n").unwrap(), fan_hash("123456").unwrap());
    }

    #[test]
    fn deterministic_across_calls() {
        assert_eq!(fan_hash("987654321").unwrap(), fan_hash("987654321").unwrap());
    }

    #[test]
    fn output_shape_is_0x_plus_64_lowercase_hex() {
        for input in ["123456", "ABCDE", "ፋን-አልባ", "0"] {
            let digest = fan_hash(input).unwrap();
            assert_eq!(digest.len(), 66, "wrong length for {input:?}");
            assert!(digest.starts_with("0x"));
            assert!(
                digest[2..]
                    .chars()
                    .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()),
                "non-lowercase-hex digest for {input:?}: {digest}"
            );
        }
    }

    #[test]
    fn distinct_inputs_hash_distinctly() {
        // Representative sample, not exhaustive — collision resistance is
        // the hash function's property, this guards against formatting bugs
        // (e.g. truncation) that would collapse outputs.
        let inputs: Vec<String> = (0..256).map(|i| format!("10000{i:03}")).collect();
        let mut seen = std::collections::HashSet::new();
        for input in &inputs {
            assert!(seen.insert(fan_hash(input).unwrap()), "collision for {input}");
        }
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(fan_hash(""), Err(AbetError::EmptyIdentifier)));
        assert!(matches!(fan_hash("   \t\n"), Err(AbetError::EmptyIdentifier)));
    }
}
