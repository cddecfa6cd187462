// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use serde::{Deserialize, Serialize};

/// Default API base — the Android emulator's alias for the host machine,
/// where the backend runs during development.
pub const DEFAULT_API_BASE: &str = "http://10.0.2.2:4000";

/// Environment variable that overrides the API base URL.
pub const API_BASE_ENV: &str = "ABET_API_URL";

/// Persistent application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the complaint backend.
    pub api_base_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// JPEG quality (1-100) used when re-encoding photo attachments.
    pub jpeg_quality: u8,
    /// Request the highest-accuracy GPS fix when capturing location.
    pub high_accuracy_location: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE.to_owned(),
            request_timeout_secs: 20,
            jpeg_quality: 70,
            high_accuracy_location: true,
        }
    }
}

impl AppConfig {
    /// Defaults with the `ABET_API_URL` environment override applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(API_BASE_ENV)
            && !url.trim().is_empty()
        {
            config.api_base_url = url.trim().trim_end_matches('/').to_owned();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_backend_contract() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "http://10.0.2.2:4000");
        assert_eq!(config.request_timeout_secs, 20);
        assert_eq!(config.jpeg_quality, 70);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.api_base_url, config.api_base_url);
        assert_eq!(back.jpeg_quality, config.jpeg_quality);
    }
}
