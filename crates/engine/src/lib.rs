//! Dialogue engine
//!
//! The heart of the system:
//! - Rule-based intent classification over normalized transcripts
//! - The table-driven dialogue state machine
//! - An optional LLM-backed free-form fallback for unmatched turns
//!
//! Both the classifier and the state machine are pure functions: all state
//! lives in the `step` value the telephony provider echoes back each turn.

pub mod classifier;
pub mod fallback;
pub mod script;

pub use classifier::classify;
pub use fallback::{ChatFallback, FallbackResponder};
pub use script::{entry, repeat_line, transition};

use thiserror::Error;

/// Engine errors. Classification and transitions are total functions; only
/// the fallback responder can fail.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("fallback credential missing: {0}")]
    MissingCredential(&'static str),

    #[error("fallback request failed: {0}")]
    Fallback(String),

    #[error("fallback timed out after {0} ms")]
    FallbackTimeout(u64),
}
