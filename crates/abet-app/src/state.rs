// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Global application state — reactive signals for the Dioxus UI.

use abet_core::AppConfig;
use abet_core::types::{Complaint, Session};

use crate::services::app_services::AppServices;

/// Shared state accessible to all pages via `use_context`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The registered session, if the citizen has completed registration.
    pub session: Option<Session>,
    /// Complaint history fetched from the backend.
    pub complaints: Vec<Complaint>,
    /// Application settings.
    pub config: AppConfig,
    /// Status message for user feedback.
    pub status_message: Option<String>,
}

impl AppState {
    /// Create initial state from the backend services.
    pub fn new(svc: &AppServices) -> Self {
        let config = svc.config();
        let session = svc.load_session();

        Self {
            session,
            complaints: Vec::new(),
            config,
            status_message: None,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            session: None,
            complaints: Vec::new(),
            config: AppConfig::default(),
            status_message: None,
        }
    }
}
