//! Conversational-agent turn client.
//!
//! Produces one spoken turn from a hosted agent: create a conversation,
//! send the utterance as a user message, fetch the audio reply. Every
//! turn allocates a fresh conversation; handles are never reused across
//! turns or shared between agents.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;

use crate::error::DebateError;

/// Default API root for the conversational-agent provider.
pub const ELEVEN_BASE: &str = "https://api.elevenlabs.io/v1";

const CREATE_TIMEOUT: Duration = Duration::from_secs(30);
const SEND_TIMEOUT: Duration = Duration::from_secs(30);
const FETCH_TIMEOUT: Duration = Duration::from_secs(60);
const KEY_CHECK_TIMEOUT: Duration = Duration::from_secs(15);

/// One agent audio reply, exactly as the provider returned it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioResult {
    /// Raw response body bytes, untransformed.
    pub bytes: Vec<u8>,
    /// Content type reported by the provider ("?" when absent).
    pub content_type: String,
}

#[derive(Deserialize)]
struct CreateConversationResponse {
    conversation_id: Option<String>,
    id: Option<String>,
}

/// Client for single debate turns against hosted conversational agents.
pub struct AgentTurnClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AgentTurnClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, ELEVEN_BASE)
    }

    /// Point the client at a different API root (used by tests).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Create a conversation for the agent, send one user message, and
    /// return the MP3 reply.
    ///
    /// The three calls run strictly in sequence with no retries; any
    /// failure is terminal for the whole turn and no further calls are
    /// issued.
    pub async fn produce_turn_audio(
        &self,
        agent_id: &str,
        text: &str,
    ) -> Result<AudioResult, DebateError> {
        // 1) conversation
        let resp = self
            .http
            .post(format!("{}/convai/conversations", self.base_url))
            .header("xi-api-key", &self.api_key)
            .json(&json!({ "agent_id": agent_id }))
            .timeout(CREATE_TIMEOUT)
            .send()
            .await?;
        if resp.status() != reqwest::StatusCode::OK {
            return Err(remote_rejection("Create conversation", resp).await);
        }
        let conv: CreateConversationResponse = resp
            .json()
            .await
            .map_err(|e| DebateError::Protocol(format!("Malformed conversation response: {e}")))?;
        let conv_id = conv
            .conversation_id
            .or(conv.id)
            .ok_or_else(|| DebateError::Protocol("No conversation id returned".to_string()))?;
        tracing::debug!(%conv_id, %agent_id, "conversation created");

        // 2) send message
        let resp = self
            .http
            .post(format!(
                "{}/convai/conversations/{}/messages",
                self.base_url, conv_id
            ))
            .header("xi-api-key", &self.api_key)
            .json(&json!({ "role": "user", "text": text }))
            .timeout(SEND_TIMEOUT)
            .send()
            .await?;
        if resp.status() != reqwest::StatusCode::OK {
            return Err(remote_rejection("Send message", resp).await);
        }

        // 3) fetch audio response
        let resp = self
            .http
            .get(format!(
                "{}/convai/conversations/{}/response/audio",
                self.base_url, conv_id
            ))
            .header("xi-api-key", &self.api_key)
            .header("accept", "audio/mpeg")
            .query(&[("output_format", "mp3_44100_128")])
            .timeout(FETCH_TIMEOUT)
            .send()
            .await?;
        if resp.status() != reqwest::StatusCode::OK {
            return Err(remote_rejection("Agent audio", resp).await);
        }
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("?")
            .to_string();
        let bytes = resp.bytes().await?;
        tracing::debug!(bytes = bytes.len(), %content_type, "agent audio received");

        Ok(AudioResult {
            bytes: bytes.to_vec(),
            content_type,
        })
    }

    /// Validate the key by calling the account endpoint and returning
    /// the account JSON on success. No retries, no caching.
    pub async fn check_api_key(&self) -> Result<serde_json::Value, DebateError> {
        let resp = self
            .http
            .get(format!("{}/user", self.base_url))
            .header("xi-api-key", &self.api_key)
            .header("accept", "application/json")
            .timeout(KEY_CHECK_TIMEOUT)
            .send()
            .await?;
        if resp.status() != reqwest::StatusCode::OK {
            return Err(remote_rejection("Key check", resp).await);
        }
        resp.json()
            .await
            .map_err(|e| DebateError::Protocol(format!("Malformed account response: {e}")))
    }
}

/// Fold a non-200 response into a rejection carrying the provider's body.
async fn remote_rejection(step: &'static str, resp: reqwest::Response) -> DebateError {
    let status = resp.status().as_u16();
    let message = resp.text().await.unwrap_or_default();
    DebateError::RemoteRejection {
        step,
        status,
        message,
    }
}
