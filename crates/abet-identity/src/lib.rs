// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Abet — identifier resolution and hashing.
//
// The FAN (the citizen's national identifying number) is the one piece of
// personal data this app handles. It is resolved from a QR payload or typed
// input, validated, and hashed on-device; only the hash ever reaches the
// backend.

pub mod hash;
pub mod resolver;
pub mod validate;

pub use hash::fan_hash;
pub use resolver::resolve_from_scan;
pub use validate::{validate_description, validate_fan, validate_phone};
