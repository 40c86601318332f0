//! HTTP surface
//!
//! Webhook handlers for the telephony provider, the synthesis fetch
//! endpoint, outbound-call initiation, and health. Turn webhooks never
//! return an HTTP error: whatever goes wrong, the caller hears a valid
//! control document.

pub mod http;
pub mod state;
pub mod turn;

pub use http::create_router;
pub use state::AppState;

use thiserror::Error;

/// Startup errors. Handlers do not use this type; they degrade instead.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] dialogo_config::ConfigError),

    #[error("audio error: {0}")]
    Audio(#[from] dialogo_audio::AudioError),

    #[error("telephony error: {0}")]
    Telephony(#[from] dialogo_telephony::TelephonyError),

    #[error("engine error: {0}")]
    Engine(#[from] dialogo_engine::EngineError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
