// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Abet — remote API client and attachment preparation.

pub mod attachment;
pub mod client;
pub mod models;

pub use attachment::prepare_photo;
pub use client::ApiClient;
