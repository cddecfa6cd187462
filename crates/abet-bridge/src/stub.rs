// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for desktop/CI builds where native mobile APIs are unavailable.
//
// Camera, scanner, and location return `PlatformUnavailable` — the pages
// fall back to rfd file dialogs and manual entry. The keychain falls back
// to nothing; desktop session persistence is handled by the app's data dir.

use abet_core::error::{AbetError, Result};
use abet_core::types::GeoPoint;

use crate::traits::*;

/// No-op bridge returned on non-mobile platforms.
pub struct StubBridge;

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }
}

impl NativeCamera for StubBridge {
    fn capture_photo(&self) -> Result<Option<Vec<u8>>> {
        tracing::warn!("NativeCamera::capture_photo called on stub bridge");
        Err(AbetError::PlatformUnavailable)
    }
}

impl NativeBarcodeScanner for StubBridge {
    fn scan_code(&self) -> Result<Option<String>> {
        tracing::warn!("NativeBarcodeScanner::scan_code called on stub bridge");
        Err(AbetError::PlatformUnavailable)
    }
}

impl NativePhotoPicker for StubBridge {
    fn pick_photo(&self) -> Result<Option<Vec<u8>>> {
        tracing::warn!("NativePhotoPicker::pick_photo called on stub bridge");
        Err(AbetError::PlatformUnavailable)
    }
}

impl NativeLocation for StubBridge {
    fn current_position(&self, _high_accuracy: bool) -> Result<GeoPoint> {
        tracing::warn!("NativeLocation::current_position called on stub bridge");
        Err(AbetError::PlatformUnavailable)
    }
}

impl NativeKeychain for StubBridge {
    fn store_secret(&self, _key: &str, _value: &[u8]) -> Result<()> {
        Err(AbetError::PlatformUnavailable)
    }

    fn load_secret(&self, _key: &str) -> Result<Option<Vec<u8>>> {
        Err(AbetError::PlatformUnavailable)
    }

    fn delete_secret(&self, _key: &str) -> Result<()> {
        Err(AbetError::PlatformUnavailable)
    }
}
