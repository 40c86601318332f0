//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Voice and audio-asset configuration
    #[serde(default)]
    pub voice: VoiceConfig,

    /// Speech synthesis configuration
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    /// Dialogue timing configuration
    #[serde(default)]
    pub dialog: DialogConfig,

    /// Optional LLM fallback configuration
    #[serde(default)]
    pub llm: LlmConfig,

    /// Telephony provider configuration
    #[serde(default)]
    pub telephony: TelephonyConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Settings {
    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.voice.public_base_url.ends_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "voice.public_base_url".to_string(),
                message: "must not end with a trailing slash".to_string(),
            });
        }

        for (field, value) in [
            ("synthesis.stability", self.synthesis.stability),
            ("synthesis.similarity_boost", self.synthesis.similarity_boost),
            ("synthesis.style", self.synthesis.style),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    message: format!("must be within 0.0..=1.0, got {value}"),
                });
            }
        }

        if self.synthesis.cache_max_entries == 0 {
            return Err(ConfigError::InvalidValue {
                field: "synthesis.cache_max_entries".to_string(),
                message: "cache must hold at least one entry".to_string(),
            });
        }

        if self.llm.enabled && self.llm.api_key.is_none() {
            return Err(ConfigError::MissingField("llm.api_key".to_string()));
        }

        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Voice and audio-asset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceConfig {
    /// Speech recognition language passed to the provider
    #[serde(default = "default_language")]
    pub language: String,

    /// Externally reachable base URL, used to build callback and audio URLs.
    /// No trailing slash.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    /// Directory holding the pre-rendered MP3 assets
    #[serde(default = "default_audio_dir")]
    pub audio_dir: String,
}

fn default_language() -> String {
    "es-ES".to_string()
}
fn default_public_base_url() -> String {
    "http://localhost:8080".to_string()
}
fn default_audio_dir() -> String {
    "public/audio".to_string()
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            public_base_url: default_public_base_url(),
            audio_dir: default_audio_dir(),
        }
    }
}

/// Speech synthesis (ElevenLabs) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// API key; synthesis is unavailable without it
    #[serde(default)]
    pub api_key: Option<String>,

    /// Upstream API base URL
    #[serde(default = "default_synthesis_api_base")]
    pub api_base: String,

    /// Voice identifier
    #[serde(default = "default_voice_id")]
    pub voice_id: String,

    /// Model identifier
    #[serde(default = "default_model_id")]
    pub model_id: String,

    #[serde(default = "default_stability")]
    pub stability: f32,

    #[serde(default = "default_similarity_boost")]
    pub similarity_boost: f32,

    #[serde(default = "default_style")]
    pub style: f32,

    #[serde(default = "default_true")]
    pub use_speaker_boost: bool,

    /// Upstream request timeout in milliseconds
    #[serde(default = "default_synthesis_timeout_ms")]
    pub timeout_ms: u64,

    /// Cache entry time-to-live in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Cache capacity in entries
    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: usize,
}

fn default_synthesis_api_base() -> String {
    "https://api.elevenlabs.io".to_string()
}
fn default_voice_id() -> String {
    "1eHrpOW5l98cxiSRjbzJ".to_string()
}
fn default_model_id() -> String {
    "eleven_multilingual_v2".to_string()
}
fn default_stability() -> f32 {
    0.5
}
fn default_similarity_boost() -> f32 {
    0.75
}
fn default_style() -> f32 {
    0.5
}
fn default_synthesis_timeout_ms() -> u64 {
    4000
}
fn default_cache_ttl_secs() -> u64 {
    300
}
fn default_cache_max_entries() -> usize {
    50
}
fn default_true() -> bool {
    true
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: default_synthesis_api_base(),
            voice_id: default_voice_id(),
            model_id: default_model_id(),
            stability: default_stability(),
            similarity_boost: default_similarity_boost(),
            style: default_style(),
            use_speaker_boost: true,
            timeout_ms: default_synthesis_timeout_ms(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_max_entries: default_cache_max_entries(),
        }
    }
}

/// Dialogue timing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogConfig {
    /// Listening window after the still-there re-prompt, in seconds
    #[serde(default = "default_reprompt_timeout_secs")]
    pub reprompt_timeout_secs: u64,
}

fn default_reprompt_timeout_secs() -> u64 {
    4
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            reprompt_timeout_secs: default_reprompt_timeout_secs(),
        }
    }
}

/// Optional LLM fallback for turns the rule classifier cannot place
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Feature switch; off by default
    #[serde(default)]
    pub enabled: bool,

    /// API key, required when enabled
    #[serde(default)]
    pub api_key: Option<String>,

    /// Chat-completions API base URL
    #[serde(default = "default_llm_api_base")]
    pub api_base: String,

    /// Model name
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// Request timeout in milliseconds. The caller is live on the line;
    /// a slow fallback is worse than the scripted re-prompt.
    #[serde(default = "default_llm_timeout_ms")]
    pub timeout_ms: u64,

    /// Reply length cap in tokens
    #[serde(default = "default_llm_max_tokens")]
    pub max_tokens: u32,
}

fn default_llm_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}
fn default_llm_model() -> String {
    "gpt-4o-mini".to_string()
}
fn default_llm_timeout_ms() -> u64 {
    2500
}
fn default_llm_max_tokens() -> u32 {
    60
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: None,
            api_base: default_llm_api_base(),
            model: default_llm_model(),
            timeout_ms: default_llm_timeout_ms(),
            max_tokens: default_llm_max_tokens(),
        }
    }
}

/// Telephony provider (Twilio) configuration. All three credentials are
/// required to place outbound calls; webhooks work without them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelephonyConfig {
    #[serde(default)]
    pub account_sid: Option<String>,

    #[serde(default)]
    pub auth_token: Option<String>,

    /// E.164 caller number
    #[serde(default)]
    pub from_number: Option<String>,

    /// Provider REST API base URL
    #[serde(default = "default_telephony_api_base")]
    pub api_base: String,
}

fn default_telephony_api_base() -> String {
    "https://api.twilio.com".to_string()
}

impl Default for TelephonyConfig {
    fn default() -> Self {
        Self {
            account_sid: None,
            auth_token: None,
            from_number: None,
            api_base: default_telephony_api_base(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level filter, overridden by RUST_LOG
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON logs
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

/// Load settings from files and environment
///
/// Priority (highest to lowest):
/// 1. Environment variables (DIALOGO__ prefix)
/// 2. config/{env}.toml (if env specified)
/// 3. config/default.toml
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name("config/default").required(false));

    if let Some(env_name) = env {
        builder = builder.add_source(File::with_name(&format!("config/{env_name}")).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("DIALOGO")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}
