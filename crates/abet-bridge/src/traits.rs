// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for native capabilities.

use abet_core::error::Result;
use abet_core::types::GeoPoint;

/// Unified bridge that groups all native capabilities.
///
/// Platforms that lack a capability (e.g. no GPS on a desktop tower)
/// return `AbetError::PlatformUnavailable` from the stub implementation;
/// the pages then offer a manual alternative.
pub trait PlatformBridge:
    NativeCamera + NativeBarcodeScanner + NativePhotoPicker + NativeLocation + NativeKeychain
    + Send + Sync
{
    /// Human-readable platform name (e.g. "iOS", "Android").
    fn platform_name(&self) -> &str;
}

/// Capture a photo with the device camera.
pub trait NativeCamera {
    /// Launch the system camera and return the captured JPEG bytes.
    /// Returns `Ok(None)` if the user cancelled.
    fn capture_photo(&self) -> Result<Option<Vec<u8>>>;
}

/// Decode a QR/barcode with the device camera.
pub trait NativeBarcodeScanner {
    /// Present the system scanner and return the decoded payload string.
    /// Returns `Ok(None)` if the user cancelled without a successful decode.
    ///
    /// The payload is raw — run it through
    /// `abet_identity::resolve_from_scan` before treating it as a FAN.
    fn scan_code(&self) -> Result<Option<String>>;
}

/// Pick an existing photo from the device gallery.
pub trait NativePhotoPicker {
    /// Present the gallery picker and return the selected image bytes.
    /// Returns `Ok(None)` if the user cancelled.
    fn pick_photo(&self) -> Result<Option<Vec<u8>>>;
}

/// Read the device's current position.
pub trait NativeLocation {
    /// Return the best-known current position.
    ///
    /// `high_accuracy` requests a GPS fix rather than a coarse network
    /// estimate; implementations may fall back when GPS is cold.
    fn current_position(&self, high_accuracy: bool) -> Result<GeoPoint>;
}

/// Secure storage for the session token in the platform keychain/keystore.
pub trait NativeKeychain {
    /// Store a secret under the given key.
    fn store_secret(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Retrieve a secret by key. Returns `None` if not found.
    fn load_secret(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Delete a secret by key.
    fn delete_secret(&self, key: &str) -> Result<()>;
}
