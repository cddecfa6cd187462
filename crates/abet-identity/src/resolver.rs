// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// FAN extraction from scanned QR payloads.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// First maximal run of 6+ consecutive decimal digits.
///
/// Six is the shortest FAN observed in the field; anything shorter inside a
/// payload is treated as incidental (port numbers, dates in URLs).
static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{6,}").expect("digit-run pattern is valid"));

/// Resolve a scanned QR payload to a FAN candidate.
///
/// QR codes on ID cards carry either the bare FAN, a URL embedding it, or
/// arbitrary text. The first run of 6+ digits wins; if there is none the
/// payload is returned unchanged so the user can correct it in the input
/// field before submission. An empty payload yields `None` and the scan
/// event should be ignored.
///
/// This is a best-effort heuristic, not validation — callers must keep the
/// result user-editable and validate before hashing.
pub fn resolve_from_scan(payload: &str) -> Option<String> {
    if payload.is_empty() {
        return None;
    }

    match DIGIT_RUN.find(payload) {
        Some(run) => {
            debug!(len = run.as_str().len(), "digit run extracted from scan");
            Some(run.as_str().to_owned())
        }
        None => {
            debug!(payload_len = payload.len(), "no digit run — passing payload through");
            Some(payload.to_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_digit_run_from_mixed_text() {
        assert_eq!(resolve_from_scan("abc123456def").as_deref(), Some("123456"));
    }

    #[test]
    fn extracts_fan_embedded_in_url() {
        assert_eq!(
            resolve_from_scan("https://x.com/fan/987654321").as_deref(),
            Some("987654321")
        );
    }

    #[test]
    fn first_of_several_runs_wins() {
        assert_eq!(
            resolve_from_scan("id=111222;alt=333444555666").as_deref(),
            Some("111222")
        );
    }

    #[test]
    fn run_is_maximal_not_truncated() {
        assert_eq!(
            resolve_from_scan("fan:12345678901234").as_deref(),
            Some("12345678901234")
        );
    }

    #[test]
    fn non_numeric_payload_falls_through_unchanged() {
        assert_eq!(resolve_from_scan("ABCDE").as_deref(), Some("ABCDE"));
    }

    #[test]
    fn five_digits_is_below_threshold() {
        assert_eq!(resolve_from_scan("12345").as_deref(), Some("12345"));
    }

    #[test]
    fn empty_payload_yields_none() {
        assert_eq!(resolve_from_scan(""), None);
    }

    #[test]
    fn non_empty_payload_never_resolves_empty() {
        for payload in ["x", "  ", "no digits here", "12", "999999"] {
            let resolved = resolve_from_scan(payload).unwrap();
            assert!(!resolved.is_empty(), "empty result for payload {payload:?}");
        }
    }
}
