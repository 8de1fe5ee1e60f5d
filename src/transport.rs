use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::RelayConfig;
use crate::submission::draft::{Purpose, SubmissionDraft};

/// Fields forwarded to the relay. The relay ignores fields it doesn't know.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelayPayload {
    pub name: String,
    pub email: String,
    pub message: String,
    pub subject: String,
    pub from_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<Purpose>,
    pub website: String,
    pub phone2: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl RelayPayload {
    pub fn from_draft(draft: &SubmissionDraft) -> Self {
        let name = draft.name.trim().to_string();
        let subject = match draft.purpose {
            Some(Purpose::Project) => format!("New project inquiry from {name}"),
            Some(Purpose::Hello) => format!("Hello from {name}"),
            Some(Purpose::Collaboration) => format!("Collaboration request from {name}"),
            None => format!("New message from {name}"),
        };

        Self {
            email: draft.email.trim().to_string(),
            message: draft.message.trim().to_string(),
            from_name: name.clone(),
            name,
            subject,
            purpose: draft.purpose,
            website: draft.honeypots.website.clone(),
            phone2: draft.honeypots.phone2.clone(),
            timestamp: draft.rendered_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelayReceipt {
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransportError {
    Network(String),
    Status(u16),
    Rejected(String),
    Malformed(String),
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::Network(msg) => write!(f, "Relay request failed: {msg}"),
            TransportError::Status(code) => write!(f, "Relay responded with status {code}"),
            TransportError::Rejected(msg) => write!(f, "Relay rejected submission: {msg}"),
            TransportError::Malformed(msg) => write!(f, "Malformed relay response: {msg}"),
        }
    }
}

impl std::error::Error for TransportError {}

/// Delivers one clean submission. Implementations make a single attempt.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn deliver(&self, payload: &RelayPayload) -> Result<RelayReceipt, TransportError>;
}

#[derive(Serialize)]
struct RelayRequest<'a> {
    access_key: &'a str,
    #[serde(flatten)]
    payload: &'a RelayPayload,
}

#[derive(Deserialize)]
struct RelayResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

pub struct RelayTransport {
    client: reqwest::Client,
    url: String,
    access_key: String,
}

impl RelayTransport {
    pub fn new(config: &RelayConfig) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| format!("Failed to build relay client: {e}"))?;

        Ok(Self {
            client,
            url: config.url.clone(),
            access_key: config.access_key.clone(),
        })
    }
}

#[async_trait]
impl Transport for RelayTransport {
    async fn deliver(&self, payload: &RelayPayload) -> Result<RelayReceipt, TransportError> {
        let body = RelayRequest {
            access_key: &self.access_key,
            payload,
        };

        let resp = self
            .client
            .post(&self.url)
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = resp.status().as_u16();
        if status != 200 {
            return Err(TransportError::Status(status));
        }

        let text = resp
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let parsed: RelayResponse =
            serde_json::from_str(&text).map_err(|e| TransportError::Malformed(e.to_string()))?;

        if !parsed.success {
            return Err(TransportError::Rejected(
                parsed.message.unwrap_or_else(|| "unknown reason".to_string()),
            ));
        }

        Ok(RelayReceipt {
            message: parsed.message,
        })
    }
}
