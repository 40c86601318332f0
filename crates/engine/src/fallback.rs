//! Free-form fallback responder
//!
//! When a turn classifies as unrecognized the scripted path replays the
//! step's question. With the LLM feature enabled, a chat-completion API gets
//! one chance to produce a short in-character reply first. The fallback runs
//! under its own timeout and any failure drops back to the scripted line;
//! it can improve a turn but never break one.

use std::time::Duration;

use async_trait::async_trait;
use dialogo_config::LlmConfig;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::EngineError;

/// One short Spanish reply to an unmatched caller turn.
#[async_trait]
pub trait FallbackResponder: Send + Sync {
    async fn reply(&self, transcript: &str) -> Result<String, EngineError>;
}

const SYSTEM_PROMPT: &str = "Eres Cristina, teleoperadora de Calidad Energía. \
    Ayudas a clientes a ahorrar en la factura de la luz. Responde a lo que diga \
    el cliente en una sola frase corta y natural en español, y termina \
    retomando la pregunta pendiente de la llamada.";

/// Chat-completion backed responder.
pub struct ChatFallback {
    client: reqwest::Client,
    config: LlmConfig,
    api_key: String,
}

impl ChatFallback {
    pub fn new(config: LlmConfig) -> Result<Self, EngineError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(EngineError::MissingCredential("llm.api_key"))?;
        Ok(Self {
            client: reqwest::Client::new(),
            config,
            api_key,
        })
    }

    async fn request(&self, transcript: &str) -> Result<String, EngineError> {
        let url = format!("{}/chat/completions", self.config.api_base);
        let body = json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": transcript },
            ],
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| EngineError::Fallback(e.to_string()))?
            .error_for_status()
            .map_err(|e| EngineError::Fallback(e.to_string()))?;

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| EngineError::Fallback(e.to_string()))?;

        let reply = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .unwrap_or_default();

        if reply.is_empty() {
            return Err(EngineError::Fallback("empty completion".to_string()));
        }
        Ok(reply)
    }
}

#[async_trait]
impl FallbackResponder for ChatFallback {
    async fn reply(&self, transcript: &str) -> Result<String, EngineError> {
        let budget = Duration::from_millis(self.config.timeout_ms);
        let reply = tokio::time::timeout(budget, self.request(transcript))
            .await
            .map_err(|_| EngineError::FallbackTimeout(self.config.timeout_ms))??;
        debug!(chars = reply.len(), "fallback reply generated");
        Ok(reply)
    }
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}
