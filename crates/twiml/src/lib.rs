//! Call-control documents
//!
//! Renders the provider-facing XML that drives each turn: play the decided
//! audio, optionally listen for the next utterance, and always end in a
//! deterministic state. Continuing turns carry a built-in silence recovery:
//! one still-there re-prompt, one more listening window, then hangup. The
//! provider only ever reaches a document that terminates by itself.
//!
//! All interpolated text and attribute values are XML-escaped here and
//! nowhere else.

pub mod escape;
pub mod response;

pub use escape::escape;
pub use response::{GatherSpec, VoiceResponse, CONTENT_TYPE};
