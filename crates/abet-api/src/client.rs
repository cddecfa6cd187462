// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Async HTTP client for the complaint backend:
//   - POST /api/auth/register-citizen   (multipart: fanHash, phone, idPhoto?)
//   - POST /api/complaints              (multipart, bearer auth)
//   - GET  /api/complaints/my           (bearer auth)
//
// Multipart encoding itself is reqwest's job; this module only decides the
// field names and error mapping.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use tracing::{debug, info, instrument};

use abet_core::AppConfig;
use abet_core::error::{AbetError, Result};
use abet_core::types::{Attachment, Complaint, ComplaintSubmission};

use crate::models::{ApiErrorBody, RegisterResponse, SubmitResponse};

/// Async client bound to one backend base URL.
///
/// Cheap to clone — reqwest's `Client` is an `Arc` internally — so the UI
/// can hand copies into spawned tasks freely.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Build a client from the app configuration.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AbetError::Http(format!("client construction: {e}")))?;

        Ok(Self {
            base_url: config.api_base_url.trim_end_matches('/').to_owned(),
            http,
        })
    }

    /// The base URL this client targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Register a citizen account keyed by the FAN hash.
    ///
    /// The raw FAN never appears in the request — only the `0x`-prefixed
    /// Keccak-256 digest. The optional ID photo is attached as `idPhoto`.
    #[instrument(skip(self, id_photo), fields(base = %self.base_url))]
    pub async fn register_citizen(
        &self,
        fan_hash: &str,
        phone: &str,
        id_photo: Option<Attachment>,
    ) -> Result<RegisterResponse> {
        let mut form = Form::new()
            .text("fanHash", fan_hash.to_owned())
            .text("phone", phone.trim().to_owned());

        if let Some(photo) = id_photo {
            form = form.part("idPhoto", attachment_part(photo)?);
        }

        info!("sending register-citizen");
        let response = self
            .http
            .post(format!("{}/api/auth/register-citizen", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AbetError::Http(format!("register-citizen: {e}")))?;

        let response = check_status(response).await?;
        response
            .json::<RegisterResponse>()
            .await
            .map_err(|e| AbetError::Http(format!("register-citizen response body: {e}")))
    }

    /// File a complaint on behalf of the registered citizen.
    ///
    /// Tags and location are JSON-encoded into text fields (the backend
    /// parses them out of the multipart form); each photo becomes one
    /// `photos` part.
    #[instrument(
        skip(self, token, submission),
        fields(base = %self.base_url, photos = submission.photos.len(), tags = submission.tags.len())
    )]
    pub async fn submit_complaint(
        &self,
        token: &str,
        submission: ComplaintSubmission,
    ) -> Result<SubmitResponse> {
        let mut form = Form::new()
            .text("fanHash", submission.fan_hash.clone())
            .text("description", submission.description.clone())
            .text("tags", serde_json::to_string(&submission.tags)?);

        if let Some(location) = submission.location {
            form = form.text("location", serde_json::to_string(&location)?);
        }

        for photo in submission.photos {
            form = form.part("photos", attachment_part(photo)?);
        }

        info!("sending complaint submission");
        let response = self
            .http
            .post(format!("{}/api/complaints", self.base_url))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AbetError::Http(format!("submit complaint: {e}")))?;

        let response = check_status(response).await?;
        let submitted: SubmitResponse = response
            .json()
            .await
            .map_err(|e| AbetError::Http(format!("submit response body: {e}")))?;

        info!(id = %submitted.id, "complaint accepted by backend");
        Ok(submitted)
    }

    /// Fetch the citizen's own complaints.
    #[instrument(skip(self, token), fields(base = %self.base_url))]
    pub async fn my_complaints(&self, token: &str) -> Result<Vec<Complaint>> {
        debug!("fetching my complaints");
        let response = self
            .http
            .get(format!("{}/api/complaints/my", self.base_url))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AbetError::Http(format!("my complaints: {e}")))?;

        let response = check_status(response).await?;
        let complaints: Vec<Complaint> = response
            .json()
            .await
            .map_err(|e| AbetError::Http(format!("my complaints body: {e}")))?;

        debug!(count = complaints.len(), "received complaint list");
        Ok(complaints)
    }
}

/// Turn an [`Attachment`] into a multipart file part.
fn attachment_part(attachment: Attachment) -> Result<Part> {
    Part::bytes(attachment.bytes)
        .file_name(attachment.file_name)
        .mime_str(&attachment.mime_type)
        .map_err(|e| AbetError::Http(format!("invalid attachment MIME type: {e}")))
}

/// Pass 2xx responses through; decode everything else into `AbetError::Api`.
///
/// The backend sends `{ "message": ... }` on failure, but proxies in front
/// of it may send plain text — fall back to the raw body, then the status.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|b| b.message)
        .unwrap_or_else(|_| {
            if body.trim().is_empty() {
                status.to_string()
            } else {
                body
            }
        });

    Err(AbetError::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalised() {
        let config = AppConfig {
            api_base_url: "http://localhost:4000/".into(),
            ..AppConfig::default()
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:4000");
    }

    #[test]
    fn attachment_part_accepts_jpeg() {
        let att = Attachment::jpeg(0, vec![0xFF, 0xD8, 0xFF]);
        assert!(attachment_part(att).is_ok());
    }

    #[test]
    fn attachment_part_rejects_malformed_mime() {
        let att = Attachment::new("x.bin", "not a mime type", vec![0]);
        assert!(attachment_part(att).is_err());
    }

    #[test]
    fn tags_encode_as_json_array_of_keys() {
        use abet_core::types::ComplaintTag;
        let tags = vec![ComplaintTag::Pothole, ComplaintTag::Water];
        let json = serde_json::to_string(&tags).unwrap();
        assert_eq!(json, r#"["pothole","water"]"#);
    }

    #[tokio::test]
    async fn unreachable_backend_surfaces_transport_error() {
        // Port 1 is essentially never listening; connect fails immediately.
        let config = AppConfig {
            api_base_url: "http://127.0.0.1:1".into(),
            request_timeout_secs: 2,
            ..AppConfig::default()
        };
        let client = ApiClient::new(&config).unwrap();
        let err = client.my_complaints("token").await.unwrap_err();
        assert!(matches!(err, AbetError::Http(_)), "got {err:?}");
    }
}
