// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Input validation for the registration and submission forms.
//
// The resolver deliberately passes malformed scans through for manual
// correction, so these checks are the gate in front of hashing and the API.

use abet_core::error::{AbetError, Result};

/// A FAN must be non-empty after trimming. Anything else is accepted —
/// some regions issue alphanumeric identifiers.
pub fn validate_fan(raw: &str) -> Result<()> {
    if raw.trim().is_empty() {
        return Err(AbetError::EmptyIdentifier);
    }
    Ok(())
}

/// Phone numbers: optional leading `+`, then 9-15 digits, nothing else.
///
/// Loose on purpose — the backend does the authoritative check; this only
/// catches obvious typos before a round trip.
pub fn validate_phone(raw: &str) -> Result<()> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(AbetError::InvalidPhone(format!(
            "expected digits with an optional leading +, got {trimmed:?}"
        )));
    }
    if !(9..=15).contains(&digits.len()) {
        return Err(AbetError::InvalidPhone(format!(
            "expected 9-15 digits, got {}",
            digits.len()
        )));
    }
    Ok(())
}

/// A complaint description must say something.
pub fn validate_description(raw: &str) -> Result<()> {
    if raw.trim().is_empty() {
        return Err(AbetError::EmptyDescription);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_rejects_whitespace_only() {
        assert!(validate_fan("  \t").is_err());
        assert!(validate_fan("123456").is_ok());
        assert!(validate_fan("AB-99-X").is_ok());
    }

    #[test]
    fn phone_accepts_e164_style() {
        assert!(validate_phone("+251911234567").is_ok());
        assert!(validate_phone("0911234567").is_ok());
        assert!(validate_phone(" +251911234567 ").is_ok());
    }

    #[test]
    fn phone_rejects_letters_and_separators() {
        assert!(validate_phone("+251-911-234-567").is_err());
        assert!(validate_phone("CALL ME").is_err());
        assert!(validate_phone("+").is_err());
    }

    #[test]
    fn phone_rejects_wrong_lengths() {
        assert!(validate_phone("12345678").is_err()); // 8 digits
        assert!(validate_phone("1234567890123456").is_err()); // 16 digits
    }

    #[test]
    fn description_must_be_non_empty() {
        assert!(validate_description("").is_err());
        assert!(validate_description("   ").is_err());
        assert!(validate_description("pothole on main street").is_ok());
    }
}
