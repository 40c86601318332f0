//! Audio rendering
//!
//! Turns scripted lines into playable audio URLs:
//! - A resolver that prefers pre-rendered static assets and falls back to
//!   on-demand synthesis
//! - An ElevenLabs synthesis gateway behind a trait
//! - A TTL and capacity bounded byte cache wrapping the gateway

pub mod cache;
pub mod gateway;
pub mod resolver;

pub use cache::{CacheStats, CachedSynthesizer, SynthesisCache};
pub use gateway::{ElevenLabsGateway, TtsGateway};
pub use resolver::{resolve, AudioRef};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("synthesis credential missing: {0}")]
    MissingCredential(&'static str),

    #[error("synthesis upstream unavailable: {0}")]
    SynthesisUnavailable(String),

    #[error("synthesis timed out after {0} ms")]
    UpstreamTimeout(u64),
}
