//! Cloud text-to-speech bridge.
//!
//! Thin client for the Google Cloud Text-to-Speech REST API, used by the
//! synthesis test mode. Credentials come from the ambient service-account
//! resolution in [`crate::credentials`]; every internal failure surfaces
//! as the opaque [`DebateError::Synthesis`], with details only in
//! debug-level traces.

use std::time::Duration;

use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::credentials;
use crate::error::DebateError;

/// Default API root for the synthesis backend.
pub const GCP_TTS_BASE: &str = "https://texttospeech.googleapis.com";

const SYNTH_TIMEOUT: Duration = Duration::from_secs(30);
const TTS_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Output encodings supported by the synthesis endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudioEncoding {
    Mp3,
    OggOpus,
    Linear16,
}

/// One synthesis request.
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    pub text: String,
    /// Full voice name like "en-US-Standard-A".
    pub voice_name: Option<String>,
    /// Explicit language code; inferred from the voice name when absent.
    pub language_code: Option<String>,
    pub speaking_rate: Option<f64>,
    pub pitch: Option<f64>,
    pub encoding: AudioEncoding,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice_name: None,
            language_code: None,
            speaking_rate: None,
            pitch: None,
            encoding: AudioEncoding::Mp3,
        }
    }

    pub fn with_voice(mut self, voice_name: impl Into<String>) -> Self {
        self.voice_name = Some(voice_name.into());
        self
    }

    pub fn with_language(mut self, language_code: impl Into<String>) -> Self {
        self.language_code = Some(language_code.into());
        self
    }

    pub fn with_speaking_rate(mut self, rate: f64) -> Self {
        self.speaking_rate = Some(rate);
        self
    }

    pub fn with_pitch(mut self, pitch: f64) -> Self {
        self.pitch = Some(pitch);
        self
    }

    pub fn with_encoding(mut self, encoding: AudioEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}

#[derive(Serialize)]
struct SynthesizeBody<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    #[serde(rename = "audioConfig")]
    audio_config: AudioConfig,
}

#[derive(Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct VoiceSelection<'a> {
    #[serde(rename = "languageCode")]
    language_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: AudioEncoding,
    #[serde(skip_serializing_if = "Option::is_none")]
    speaking_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pitch: Option<f64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

/// Client for the synthesis backend.
pub struct SpeechSynthesizer {
    http: reqwest::Client,
    base_url: String,
}

impl Default for SpeechSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechSynthesizer {
    pub fn new() -> Self {
        Self::with_base_url(GCP_TTS_BASE)
    }

    /// Point the client at a different API root (used by tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Synthesize speech, resolving credentials from the environment.
    pub async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, DebateError> {
        if credentials::ensure_from_env().is_none() {
            tracing::debug!("no speech credentials available");
            return Err(DebateError::Synthesis);
        }
        let provider = gcp_auth::provider().await.map_err(|e| {
            tracing::debug!(error = %e, "token provider init failed");
            DebateError::Synthesis
        })?;
        let token = provider.token(&[TTS_SCOPE]).await.map_err(|e| {
            tracing::debug!(error = %e, "token fetch failed");
            DebateError::Synthesis
        })?;
        self.synthesize_with_token(token.as_str(), request).await
    }

    /// Issue the synthesis call with a caller-supplied bearer token.
    pub async fn synthesize_with_token(
        &self,
        token: &str,
        request: &SynthesisRequest,
    ) -> Result<Vec<u8>, DebateError> {
        let language_code = request
            .language_code
            .clone()
            .unwrap_or_else(|| infer_language_code(request.voice_name.as_deref()));

        let body = SynthesizeBody {
            input: SynthesisInput {
                text: &request.text,
            },
            voice: VoiceSelection {
                language_code,
                name: request.voice_name.as_deref(),
            },
            audio_config: AudioConfig {
                audio_encoding: request.encoding,
                speaking_rate: request.speaking_rate,
                pitch: request.pitch,
            },
        };

        let resp = self
            .http
            .post(format!("{}/v1/text:synthesize", self.base_url))
            .bearer_auth(token)
            .json(&body)
            .timeout(SYNTH_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "synthesis request failed");
                DebateError::Synthesis
            })?;
        if !resp.status().is_success() {
            tracing::debug!(status = resp.status().as_u16(), "synthesis rejected");
            return Err(DebateError::Synthesis);
        }

        let payload: SynthesizeResponse = resp.json().await.map_err(|e| {
            tracing::debug!(error = %e, "malformed synthesis response");
            DebateError::Synthesis
        })?;
        base64::engine::general_purpose::STANDARD
            .decode(payload.audio_content)
            .map_err(|e| {
                tracing::debug!(error = %e, "synthesis payload is not valid base64");
                DebateError::Synthesis
            })
    }
}

/// Infer "en-US" style codes from voice names like "en-US-Standard-A";
/// falls back to "en-US".
fn infer_language_code(voice_name: Option<&str>) -> String {
    if let Some(name) = voice_name {
        let mut parts = name.split('-');
        if let (Some(lang), Some(region)) = (parts.next(), parts.next())
            && !lang.is_empty()
            && !region.is_empty()
        {
            return format!("{lang}-{region}");
        }
    }
    "en-US".to_string()
}
