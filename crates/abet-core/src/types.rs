// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Abet complaint client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Server-assigned identifier for a submitted complaint.
///
/// Opaque to the client — the backend may use Mongo ObjectIds, UUIDs,
/// or anything else. Compared and displayed verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComplaintId(pub String);

impl std::fmt::Display for ComplaintId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle states of a complaint as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    /// Received by the backend, not yet triaged.
    Submitted,
    /// Assigned to a department and being worked.
    InReview,
    /// Fixed / answered.
    Resolved,
    /// Closed without action.
    Rejected,
    /// Any status keyword this client version does not know.
    #[serde(other)]
    Unknown,
}

impl ComplaintStatus {
    /// Label shown in the complaint list.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Submitted => "Submitted",
            Self::InReview => "In review",
            Self::Resolved => "Resolved",
            Self::Rejected => "Rejected",
            Self::Unknown => "Unknown",
        }
    }
}

/// Complaint categories the citizen can tag a report with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintTag {
    TrafficLight,
    Pothole,
    Garbage,
    Water,
    Electric,
}

impl ComplaintTag {
    /// All tags in display order.
    pub const ALL: [ComplaintTag; 5] = [
        Self::TrafficLight,
        Self::Pothole,
        Self::Garbage,
        Self::Water,
        Self::Electric,
    ];

    /// Stable wire keyword sent to the backend.
    pub fn key(&self) -> &'static str {
        match self {
            Self::TrafficLight => "traffic_light",
            Self::Pothole => "pothole",
            Self::Garbage => "garbage",
            Self::Water => "water",
            Self::Electric => "electric",
        }
    }

    /// Human-readable chip label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::TrafficLight => "Broken Traffic Light",
            Self::Pothole => "Pothole / Road Damage",
            Self::Garbage => "Garbage / Waste",
            Self::Water => "Water Leak / Outage",
            Self::Electric => "Power Outage",
        }
    }
}

/// A captured GPS position attached to a complaint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
    /// Horizontal accuracy in metres, when the platform reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

/// A photo ready for upload.
#[derive(Debug, Clone)]
pub struct Attachment {
    /// Local identifier, never sent to the server.
    pub id: Uuid,
    /// Filename used in the multipart part (e.g. "photo_0.jpg").
    pub file_name: String,
    /// MIME type of `bytes`.
    pub mime_type: String,
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4(),
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Convenience constructor for JPEG data with a generated name.
    pub fn jpeg(index: usize, bytes: Vec<u8>) -> Self {
        Self::new(format!("photo_{index}.jpg"), "image/jpeg", bytes)
    }
}

/// Everything needed to file one complaint with the backend.
#[derive(Debug, Clone)]
pub struct ComplaintSubmission {
    /// Pseudonymous account key (`0x` + Keccak-256 of the trimmed FAN).
    pub fan_hash: String,
    pub description: String,
    pub tags: Vec<ComplaintTag>,
    pub location: Option<GeoPoint>,
    pub photos: Vec<Attachment>,
}

impl ComplaintSubmission {
    pub fn new(fan_hash: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            fan_hash: fan_hash.into(),
            description: description.into(),
            tags: Vec::new(),
            location: None,
            photos: Vec::new(),
        }
    }
}

/// A complaint record as returned by `GET /api/complaints/my`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Complaint {
    #[serde(alias = "_id")]
    pub id: ComplaintId,
    /// Category assigned server-side during triage.
    #[serde(default)]
    pub category: Option<String>,
    pub description: String,
    #[serde(default = "default_status")]
    pub status: ComplaintStatus,
    /// Tamper-evidence key the backend chains complaint records with.
    #[serde(default, rename = "chainKey")]
    pub chain_key: Option<String>,
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_status() -> ComplaintStatus {
    ComplaintStatus::Submitted
}

/// An authenticated registration session.
///
/// The raw FAN is never stored — only its hash, which is all the
/// backend ever sees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub fan_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_keys_are_stable() {
        // Wire keys are part of the backend contract — changing one
        // silently re-categorises historical complaints.
        let keys: Vec<&str> = ComplaintTag::ALL.iter().map(|t| t.key()).collect();
        assert_eq!(
            keys,
            ["traffic_light", "pothole", "garbage", "water", "electric"]
        );
    }

    #[test]
    fn tag_serializes_to_key() {
        let json = serde_json::to_string(&ComplaintTag::TrafficLight).unwrap();
        assert_eq!(json, "\"traffic_light\"");
    }

    #[test]
    fn status_unknown_keyword_decodes_to_unknown() {
        let status: ComplaintStatus = serde_json::from_str("\"escalated_to_mayor\"").unwrap();
        assert_eq!(status, ComplaintStatus::Unknown);
    }

    #[test]
    fn complaint_accepts_mongo_style_id() {
        let json = r#"{
            "_id": "66f1a2b3c4d5e6f7a8b9c0d1",
            "description": "Streetlight out on Bole Road",
            "status": "in_review",
            "chainKey": "9a3f0c77d1e24b56"
        }"#;
        let c: Complaint = serde_json::from_str(json).unwrap();
        assert_eq!(c.id.0, "66f1a2b3c4d5e6f7a8b9c0d1");
        assert_eq!(c.status, ComplaintStatus::InReview);
        assert_eq!(c.chain_key.as_deref(), Some("9a3f0c77d1e24b56"));
        assert!(c.category.is_none());
    }

    #[test]
    fn geo_point_omits_missing_accuracy() {
        let point = GeoPoint {
            lat: 9.0054,
            lng: 38.7636,
            accuracy: None,
        };
        let json = serde_json::to_string(&point).unwrap();
        assert!(!json.contains("accuracy"));
    }

    #[test]
    fn jpeg_attachment_names_follow_index() {
        let att = Attachment::jpeg(3, vec![0xFF, 0xD8]);
        assert_eq!(att.file_name, "photo_3.jpg");
        assert_eq!(att.mime_type, "image/jpeg");
    }
}
