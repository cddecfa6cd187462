// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Abet — native platform bridge abstractions.
//
// The complaint flows need five device capabilities: camera capture, QR
// decode, photo pick, geolocation, and secret storage for the session
// token. This module defines the traits and the per-OS dispatch; the
// Dioxus layer only ever sees `dyn PlatformBridge`.

pub mod traits;

#[cfg(target_os = "ios")]
pub mod ios;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(any(target_os = "ios", target_os = "android")))]
pub mod stub;

/// Retrieve the bridge implementation for the target operating system.
pub fn platform_bridge() -> Box<dyn traits::PlatformBridge> {
    #[cfg(target_os = "ios")]
    {
        // iOS: `objc2` message passing into UIKit / Security.framework.
        Box::new(ios::IosBridge::new())
    }
    #[cfg(target_os = "android")]
    {
        // Android: `jni-rs` calls into the ART runtime.
        Box::new(android::AndroidBridge::new())
    }
    #[cfg(not(any(target_os = "ios", target_os = "android")))]
    {
        // Desktop/CI: stub — pages fall back to file dialogs and manual entry.
        Box::new(stub::StubBridge)
    }
}
