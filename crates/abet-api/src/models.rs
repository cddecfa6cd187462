// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Wire DTOs for the complaint backend.
//
// Domain types (Complaint, tags, GeoPoint) live in abet-core; the structs
// here only exist at the HTTP boundary.

use serde::Deserialize;

/// Response from `POST /api/auth/register-citizen`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    /// Bearer token for subsequent complaint calls.
    pub token: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response from `POST /api/complaints`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResponse {
    /// Server-assigned id of the new complaint.
    #[serde(alias = "_id")]
    pub id: String,
}

/// The backend's error body: `{ "message": "..." }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_response_decodes_with_and_without_message() {
        let resp: RegisterResponse =
            serde_json::from_str(r#"{"token":"jwt.abc.def"}"#).unwrap();
        assert_eq!(resp.token, "jwt.abc.def");
        assert!(resp.message.is_none());

        let resp: RegisterResponse =
            serde_json::from_str(r#"{"token":"t","message":"registered"}"#).unwrap();
        assert_eq!(resp.message.as_deref(), Some("registered"));
    }

    #[test]
    fn submit_response_accepts_either_id_field() {
        let resp: SubmitResponse = serde_json::from_str(r#"{"id":"abc123"}"#).unwrap();
        assert_eq!(resp.id, "abc123");
        let resp: SubmitResponse = serde_json::from_str(r#"{"_id":"def456"}"#).unwrap();
        assert_eq!(resp.id, "def456");
    }

    #[test]
    fn error_body_decodes_server_message() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"message":"FAN already registered"}"#).unwrap();
        assert_eq!(body.message, "FAN already registered");
    }
}
