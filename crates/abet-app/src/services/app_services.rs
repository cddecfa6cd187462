// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — initialises all backend subsystems and provides
// async-friendly methods for the Dioxus UI to call.
//
// The service struct is cheaply cloneable (Arc-wrapped fields) so it can be
// passed into closures and async blocks without lifetime issues.  The session
// token lives in the platform keychain where one exists; on desktop the
// keychain stub is unavailable and a file in the data directory is used
// instead.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use abet_api::ApiClient;
use abet_bridge::platform_bridge;
use abet_bridge::traits::PlatformBridge;
use abet_core::AppConfig;
use abet_core::error::{AbetError, Result};
use abet_core::types::{
    Complaint, ComplaintId, ComplaintSubmission, ComplaintTag, GeoPoint, Session,
};
use abet_identity::{fan_hash, validate_description, validate_fan, validate_phone};
use tracing::{info, warn};

/// Keychain entry (and fallback filename stem) for the persisted session.
const SESSION_KEY: &str = "session";

/// Environment override for the data directory, mainly for tests and CI.
const DATA_DIR_ENV: &str = "ABET_DATA_DIR";

/// Shared application services accessible from all Dioxus components via
/// `use_context::<AppServices>()`.
#[derive(Clone)]
pub struct AppServices {
    api: Arc<Mutex<ApiClient>>,
    bridge: Arc<dyn PlatformBridge>,
    data_dir: PathBuf,
    config: Arc<Mutex<AppConfig>>,
}

impl AppServices {
    /// Initialise all services.  Call once at app startup.
    ///
    /// Resolves the data directory, loads the persisted config (or the
    /// environment/default config on first run), and builds the HTTP client.
    pub fn init() -> Result<Self> {
        let dir = resolve_data_dir();
        info!(path = %dir.display(), "initialising app services");

        let config = load_config(&dir).unwrap_or_else(AppConfig::from_env);
        let api = ApiClient::new(&config)?;
        let bridge: Arc<dyn PlatformBridge> = Arc::from(platform_bridge());

        info!(platform = bridge.platform_name(), api = %config.api_base_url, "app services initialised");

        Ok(Self {
            api: Arc::new(Mutex::new(api)),
            bridge,
            data_dir: dir,
            config: Arc::new(Mutex::new(config)),
        })
    }

    fn api(&self) -> ApiClient {
        self.api.lock().expect("api lock poisoned").clone()
    }

    // -- Registration --------------------------------------------------------

    /// Register a citizen account from a raw FAN, phone number, and optional
    /// ID photo.
    ///
    /// Validates the inputs, derives the pseudonymous account key with
    /// [`fan_hash`], and exchanges it for a bearer token. The raw FAN is
    /// dropped here — only the hash leaves this function.
    pub async fn register(
        &self,
        fan_raw: &str,
        phone: &str,
        id_photo: Option<Vec<u8>>,
    ) -> Result<Session> {
        validate_fan(fan_raw)?;
        validate_phone(phone)?;
        let hash = fan_hash(fan_raw)?;

        let quality = self.config().jpeg_quality;
        let attachment = match id_photo {
            Some(raw) => Some(abet_api::prepare_photo(&raw, 0, quality)?),
            None => None,
        };

        let response = self.api().register_citizen(&hash, phone, attachment).await?;

        let session = Session {
            token: response.token,
            fan_hash: hash,
        };
        self.save_session(&session)?;

        info!("citizen registered");
        Ok(session)
    }

    // -- Complaints ----------------------------------------------------------

    /// File a complaint.  Photos arrive as raw camera/gallery bytes and are
    /// re-encoded down to upload size here.
    pub async fn submit_complaint(
        &self,
        session: &Session,
        description: &str,
        tags: Vec<ComplaintTag>,
        location: Option<GeoPoint>,
        photos: Vec<Vec<u8>>,
    ) -> Result<ComplaintId> {
        validate_description(description)?;

        let quality = self.config().jpeg_quality;
        let mut submission = ComplaintSubmission::new(&session.fan_hash, description.trim());
        submission.tags = tags;
        submission.location = location;
        for (i, raw) in photos.iter().enumerate() {
            submission.photos.push(abet_api::prepare_photo(raw, i, quality)?);
        }

        let response = self.api().submit_complaint(&session.token, submission).await?;
        info!(id = %response.id, "complaint filed");
        Ok(ComplaintId(response.id))
    }

    /// Fetch the citizen's complaint history.
    pub async fn my_complaints(&self, session: &Session) -> Result<Vec<Complaint>> {
        self.api().my_complaints(&session.token).await
    }

    // -- Native capabilities -------------------------------------------------

    /// Scan a QR code with the device camera, returning the raw payload.
    pub fn scan_qr(&self) -> Result<Option<String>> {
        self.bridge.scan_code()
    }

    /// Capture a photo with the device camera.
    pub fn capture_photo(&self) -> Result<Option<Vec<u8>>> {
        self.bridge.capture_photo()
    }

    /// Pick a photo from the device gallery.
    pub fn pick_photo(&self) -> Result<Option<Vec<u8>>> {
        self.bridge.pick_photo()
    }

    /// Read the device's current position.
    pub fn current_position(&self) -> Result<GeoPoint> {
        let high_accuracy = self.config().high_accuracy_location;
        self.bridge.current_position(high_accuracy)
    }

    // -- Session persistence -------------------------------------------------

    /// Load the persisted session, if any.
    ///
    /// Tries the platform keychain first, then the data-directory fallback
    /// file.  A corrupt entry is treated as absent.
    pub fn load_session(&self) -> Option<Session> {
        match self.bridge.load_secret(SESSION_KEY) {
            Ok(Some(bytes)) => return serde_json::from_slice(&bytes).ok(),
            Ok(None) => return None,
            Err(AbetError::PlatformUnavailable) => {}
            Err(e) => {
                warn!(error = %e, "keychain read failed");
                return None;
            }
        }
        let path = self.session_file();
        let data = std::fs::read(&path).ok()?;
        serde_json::from_slice(&data).ok()
    }

    /// Persist the session across launches.
    pub fn save_session(&self, session: &Session) -> Result<()> {
        let bytes = serde_json::to_vec(session)?;
        match self.bridge.store_secret(SESSION_KEY, &bytes) {
            Ok(()) => Ok(()),
            Err(AbetError::PlatformUnavailable) => {
                std::fs::write(self.session_file(), &bytes)?;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Forget the persisted session (sign out).
    pub fn clear_session(&self) -> Result<()> {
        match self.bridge.delete_secret(SESSION_KEY) {
            Ok(()) | Err(AbetError::PlatformUnavailable) => {}
            Err(e) => warn!(error = %e, "keychain delete failed"),
        }
        let path = self.session_file();
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }

    fn session_file(&self) -> PathBuf {
        self.data_dir.join(format!("{SESSION_KEY}.json"))
    }

    // -- Config Persistence --------------------------------------------------

    /// Get a clone of the current config.
    pub fn config(&self) -> AppConfig {
        self.config.lock().expect("config lock poisoned").clone()
    }

    /// Update and persist the config, rebuilding the HTTP client so the new
    /// base URL and timeout take effect immediately.
    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        let api = ApiClient::new(config)?;
        *self.api.lock().expect("api lock poisoned") = api;
        *self.config.lock().expect("config lock poisoned") = config.clone();
        persist_config(&self.data_dir, config)
    }

    /// Human-readable name of the platform bridge in use.
    pub fn platform_name(&self) -> String {
        self.bridge.platform_name().to_owned()
    }
}

// -- Data directory ----------------------------------------------------------

/// Resolve (and create) the directory that holds config and the desktop
/// session fallback.
///
/// `ABET_DATA_DIR` wins when set; otherwise the platform convention applies.
/// On mobile the keychain carries the session, so this directory only holds
/// config there.
fn resolve_data_dir() -> PathBuf {
    let base = if let Ok(explicit) = std::env::var(DATA_DIR_ENV)
        && !explicit.trim().is_empty()
    {
        PathBuf::from(explicit)
    } else if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg).join("abet")
    } else if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".local").join("share").join("abet")
    } else {
        std::env::temp_dir().join("abet")
    };
    if let Err(e) = std::fs::create_dir_all(&base) {
        warn!(path = %base.display(), "could not create data dir: {e}");
    }
    base
}

// -- Config file persistence -------------------------------------------------

const CONFIG_FILE: &str = "config.json";

fn load_config(data_dir: &std::path::Path) -> Option<AppConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let data = std::fs::read_to_string(&path).ok()?;
    serde_json::from_str(&data).ok()
}

fn persist_config(data_dir: &std::path::Path, config: &AppConfig) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");

        let mut config = AppConfig::default();
        config.api_base_url = "http://complaints.example:4000".into();
        config.jpeg_quality = 55;

        persist_config(dir.path(), &config).expect("persist");
        let loaded = load_config(dir.path()).expect("config file present");

        assert_eq!(loaded.api_base_url, "http://complaints.example:4000");
        assert_eq!(loaded.jpeg_quality, 55);
        assert_eq!(loaded.request_timeout_secs, config.request_timeout_secs);
    }

    #[test]
    fn missing_config_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(load_config(dir.path()).is_none());
    }

    #[test]
    fn data_dir_env_override_wins() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let target = tmp.path().join("abet-override");

        // SAFETY: no other test in this crate reads or writes this variable.
        unsafe { std::env::set_var(DATA_DIR_ENV, &target) };
        let resolved = resolve_data_dir();
        unsafe { std::env::remove_var(DATA_DIR_ENV) };

        assert_eq!(resolved, target);
        assert!(resolved.is_dir());
    }
}
