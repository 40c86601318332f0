//! Speech synthesis gateway
//!
//! HTTP client for the ElevenLabs text-to-speech API behind a trait so the
//! cache and the handlers can be tested against a mock. Every upstream
//! failure mode surfaces as an `AudioError`; there is no silent fallback to
//! a static asset here, the resolver decides that before synthesis is asked.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use dialogo_config::SynthesisConfig;
use serde_json::json;
use tracing::debug;

use crate::AudioError;

/// Text in, audio bytes out.
#[async_trait]
pub trait TtsGateway: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<Bytes, AudioError>;
}

/// ElevenLabs-backed gateway.
pub struct ElevenLabsGateway {
    client: reqwest::Client,
    config: SynthesisConfig,
    api_key: String,
}

impl ElevenLabsGateway {
    pub fn new(config: SynthesisConfig) -> Result<Self, AudioError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(AudioError::MissingCredential("synthesis.api_key"))?;
        Ok(Self {
            client: reqwest::Client::new(),
            config,
            api_key,
        })
    }

    async fn request(&self, text: &str) -> Result<Bytes, AudioError> {
        let url = format!(
            "{}/v1/text-to-speech/{}",
            self.config.api_base, self.config.voice_id
        );
        let body = json!({
            "text": text,
            "model_id": self.config.model_id,
            "voice_settings": {
                "stability": self.config.stability,
                "similarity_boost": self.config.similarity_boost,
                "style": self.config.style,
                "use_speaker_boost": self.config.use_speaker_boost,
            },
        });

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .header("accept", "audio/mpeg")
            .json(&body)
            .send()
            .await
            .map_err(|e| AudioError::SynthesisUnavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| AudioError::SynthesisUnavailable(e.to_string()))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AudioError::SynthesisUnavailable(e.to_string()))?;
        debug!(chars = text.len(), bytes = bytes.len(), "synthesized utterance");
        Ok(bytes)
    }
}

#[async_trait]
impl TtsGateway for ElevenLabsGateway {
    async fn synthesize(&self, text: &str) -> Result<Bytes, AudioError> {
        let budget = Duration::from_millis(self.config.timeout_ms);
        tokio::time::timeout(budget, self.request(text))
            .await
            .map_err(|_| AudioError::UpstreamTimeout(self.config.timeout_ms))?
    }
}
