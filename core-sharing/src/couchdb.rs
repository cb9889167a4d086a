//! CouchDB request and response handling
//!
//! Mango `_find` queries, result envelopes and the mapping of HTTP status
//! codes to [`SharingError`]s.

use bridge_traits::http::HttpResponse;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, SharingError};

/// Result cap for single-document lookups
pub const SINGLE_RESULT: u32 = 1;

/// Result cap for list lookups
pub const LIST_LIMIT: u32 = 100;

/// Equality selector over invitation fields; unset fields are not matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteSelector {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted: Option<bool>,
}

impl InviteSelector {
    pub fn to_user(mut self, email: &str) -> Self {
        self.to_user = Some(email.to_string());
        self
    }

    pub fn from_user(mut self, email: &str) -> Self {
        self.from_user = Some(email.to_string());
        self
    }

    pub fn playlist(mut self, playlist_id: &str) -> Self {
        self.playlist_id = Some(playlist_id.to_string());
        self
    }

    pub fn accepted(mut self, accepted: bool) -> Self {
        self.accepted = Some(accepted);
        self
    }
}

/// `POST /{db}/_find` body
#[derive(Debug, Clone, Serialize)]
pub struct FindRequest {
    pub selector: InviteSelector,
    pub limit: u32,
}

/// `_find` response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct FindResponse<T> {
    pub docs: Vec<T>,
    /// Set by CouchDB when no index matched the selector
    #[serde(default)]
    pub warning: Option<String>,
}

/// CouchDB error body: `{"error": "conflict", "reason": "Document update conflict."}`
#[derive(Debug, Clone, Deserialize)]
pub struct CouchErrorBody {
    pub error: String,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Turn a non-2xx response into the matching error; 2xx passes through.
pub fn check_status(response: &HttpResponse, context: &str) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }

    let body = response
        .text()
        .unwrap_or_else(|_| "<non UTF-8 body>".to_string());
    let reason = serde_json::from_str::<CouchErrorBody>(&body)
        .ok()
        .map(|err| err.reason.unwrap_or(err.error));

    warn!(status = response.status, context, "Document store request failed");

    Err(match response.status {
        404 => SharingError::NotFound(context.to_string()),
        409 => SharingError::Conflict(reason.unwrap_or_else(|| context.to_string())),
        status => SharingError::Store { status, body },
    })
}

/// Deserialize a successful response body
pub fn parse_body<T: DeserializeOwned>(response: &HttpResponse) -> Result<T> {
    serde_json::from_slice(&response.body).map_err(|e| SharingError::Parse(e.to_string()))
}
