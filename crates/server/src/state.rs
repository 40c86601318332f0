//! Application state
//!
//! Shared state across all handlers. Optional integrations (synthesis,
//! telephony, LLM fallback) are built only when their credentials are
//! configured; handlers degrade per-feature instead of failing startup.

use std::sync::Arc;
use std::time::Duration;

use dialogo_audio::{CachedSynthesizer, ElevenLabsGateway};
use dialogo_config::Settings;
use dialogo_engine::{ChatFallback, FallbackResponder};
use dialogo_telephony::TwilioClient;
use tracing::info;

use crate::ServerError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// Configuration
    pub config: Arc<Settings>,
    /// Synthesis gateway behind the byte cache, when a key is configured
    pub synth: Option<Arc<CachedSynthesizer>>,
    /// Outbound call client, when provider credentials are configured
    pub telephony: Option<Arc<TwilioClient>>,
    /// Free-form fallback for unmatched turns, when enabled
    pub fallback: Option<Arc<dyn FallbackResponder>>,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Settings) -> Result<Self, ServerError> {
        let synth = if config.synthesis.api_key.is_some() {
            let gateway = Arc::new(ElevenLabsGateway::new(config.synthesis.clone())?);
            Some(Arc::new(CachedSynthesizer::new(
                gateway,
                Duration::from_secs(config.synthesis.cache_ttl_secs),
                config.synthesis.cache_max_entries,
            )))
        } else {
            info!("synthesis key absent, on-demand synthesis disabled");
            None
        };

        let telephony = if config.telephony.account_sid.is_some() {
            Some(Arc::new(TwilioClient::new(config.telephony.clone())?))
        } else {
            info!("telephony credentials absent, outbound calls disabled");
            None
        };

        let fallback: Option<Arc<dyn FallbackResponder>> = if config.llm.enabled {
            Some(Arc::new(ChatFallback::new(config.llm.clone())?))
        } else {
            None
        };

        Ok(Self {
            config: Arc::new(config),
            synth,
            telephony,
            fallback,
        })
    }
}
