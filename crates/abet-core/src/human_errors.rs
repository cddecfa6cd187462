// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the complaint UI.
//
// Every technical error is mapped to plain English with a clear suggestion.
// Citizens filing a complaint should never see a reqwest error string.

use crate::error::AbetError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Network blip, timeout — we can retry.
    Transient,
    /// User must do something (fix an input, grant a permission).
    ActionRequired,
    /// Cannot be fixed by retrying or user action.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether tapping "try again" is worthwhile.
    pub retriable: bool,
    /// Severity level (drives icon/colour in UI).
    pub severity: Severity,
}

/// Convert an `AbetError` into something a citizen can act on.
pub fn humanize_error(err: &AbetError) -> HumanError {
    match err {
        // -- Identity errors --
        AbetError::EmptyIdentifier => HumanError {
            message: "The FAN is empty.".into(),
            suggestion: "Type your FAN number or scan the QR code on your ID card.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        AbetError::InvalidPhone(detail) => HumanError {
            message: "That phone number doesn't look right.".into(),
            suggestion: format!("Use digits only, starting with your country code, like +251911234567. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        AbetError::EmptyDescription => HumanError {
            message: "The complaint needs a description.".into(),
            suggestion: "Write a short sentence about the problem before submitting.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        // -- Remote API errors --
        AbetError::Api { status, message } => humanize_api_error(*status, message),

        AbetError::Http(detail) => HumanError {
            message: "We couldn't reach the complaint service.".into(),
            suggestion: format!("Check your internet connection and try again. ({detail})"),
            retriable: true,
            severity: Severity::Transient,
        },

        AbetError::MissingSession => HumanError {
            message: "You're not registered yet.".into(),
            suggestion: "Go to the Register tab and register with your FAN first.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        // -- Attachment errors --
        AbetError::ImageError(detail) => HumanError {
            message: "That photo couldn't be attached.".into(),
            suggestion: format!("Try taking the photo again or picking a different one. ({detail})"),
            retriable: true,
            severity: Severity::ActionRequired,
        },

        // -- Storage / persistence --
        AbetError::Io(detail) => HumanError {
            message: "Saving to this device failed.".into(),
            suggestion: format!("Make sure the device has free storage, then retry. ({detail})"),
            retriable: true,
            severity: Severity::Transient,
        },

        AbetError::Serialization(detail) => HumanError {
            message: "The app received data it couldn't understand.".into(),
            suggestion: format!("Update the app if an update is available. ({detail})"),
            retriable: false,
            severity: Severity::Permanent,
        },

        // -- Platform bridge --
        AbetError::Bridge(detail) => HumanError {
            message: "A device feature didn't respond.".into(),
            suggestion: format!("Check the app's camera and location permissions in Settings. ({detail})"),
            retriable: true,
            severity: Severity::ActionRequired,
        },

        AbetError::PlatformUnavailable => HumanError {
            message: "This feature isn't available on this device.".into(),
            suggestion: "On desktop, use the file picker instead of the camera.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },
    }
}

/// Map an HTTP status + server message to a human error.
fn humanize_api_error(status: u16, message: &str) -> HumanError {
    match status {
        400 | 422 => HumanError {
            message: "The service rejected the submission.".into(),
            suggestion: format!("Check your entries and try again. (Server said: {message})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },
        401 | 403 => HumanError {
            message: "Your session has expired.".into(),
            suggestion: "Register again with your FAN to get a new session.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },
        409 => HumanError {
            message: "This FAN is already registered.".into(),
            suggestion: "If this is your number, register again to refresh your session.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },
        413 => HumanError {
            message: "The photos are too large to upload.".into(),
            suggestion: "Remove a photo or two and submit again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },
        500..=599 => HumanError {
            message: "The complaint service had a problem.".into(),
            suggestion: "This is on our side, not yours. Please try again in a few minutes.".into(),
            retriable: true,
            severity: Severity::Transient,
        },
        _ => HumanError {
            message: "The complaint service returned an unexpected answer.".into(),
            suggestion: format!("Try again. (Status {status}: {message})"),
            retriable: true,
            severity: Severity::Transient,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_identifier_requires_action() {
        let human = humanize_error(&AbetError::EmptyIdentifier);
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(!human.retriable);
    }

    #[test]
    fn server_errors_are_retriable() {
        let human = humanize_error(&AbetError::Api {
            status: 503,
            message: "maintenance".into(),
        });
        assert_eq!(human.severity, Severity::Transient);
        assert!(human.retriable);
    }

    #[test]
    fn auth_errors_send_user_back_to_register() {
        let human = humanize_error(&AbetError::Api {
            status: 401,
            message: "jwt expired".into(),
        });
        assert!(human.suggestion.contains("Register"));
        assert!(!human.retriable);
    }
}
