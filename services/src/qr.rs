//! The payload a session QR code carries.
//!
//! Rendering the actual image is a client/collaborator concern; the server
//! only produces and parses the JSON the image encodes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storage::models::Session;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QrError {
    #[error("Failed to generate QR code")]
    Encode(#[source] serde_json::Error),

    #[error("Invalid QR code format")]
    InvalidFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: i32,
}

/// What a scanner gets back: enough to submit attendance without another
/// round trip, and the anchor so the client can pre-check its own distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrPayload {
    pub session_id: String,
    pub subject: String,
    pub location: QrLocation,
    pub created_at: DateTime<Utc>,
}

impl QrPayload {
    pub fn for_session(session: &Session) -> Self {
        Self {
            session_id: session.session_id.clone(),
            subject: session.subject.clone(),
            location: QrLocation {
                latitude: session.latitude,
                longitude: session.longitude,
                radius: session.radius,
            },
            created_at: session.created_at,
        }
    }

    pub fn encode(&self) -> Result<String, QrError> {
        serde_json::to_string(self).map_err(QrError::Encode)
    }

    pub fn parse(raw: &str) -> Result<Self, QrError> {
        serde_json::from_str(raw).map_err(|_| QrError::InvalidFormat)
    }
}
