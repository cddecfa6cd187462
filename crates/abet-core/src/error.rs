// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Abet.

use thiserror::Error;

/// Top-level error type for all Abet operations.
#[derive(Debug, Error)]
pub enum AbetError {
    // -- Identity errors --
    #[error("identifier is empty after trimming")]
    EmptyIdentifier,

    #[error("phone number is not valid: {0}")]
    InvalidPhone(String),

    #[error("complaint description is empty")]
    EmptyDescription,

    // -- Remote API errors --
    #[error("API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("HTTP transport error: {0}")]
    Http(String),

    #[error("no active session — register before submitting")]
    MissingSession,

    // -- Attachment errors --
    #[error("image processing failed: {0}")]
    ImageError(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, AbetError>;
