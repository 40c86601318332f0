//! Audio asset resolver
//!
//! Decides, per line, whether playback uses a pre-rendered static asset or
//! on-demand synthesis. Static assets win whenever they exist; only
//! personalized variants (which are unique per call) must be synthesized.
//! Resolution is pure and idempotent.

use dialogo_core::Line;

/// Where a line's audio comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioRef {
    /// Pre-rendered MP3, addressed by asset key.
    Static(&'static str),
    /// Text to run through the synthesis endpoint.
    Synthesize(String),
}

impl AudioRef {
    /// Absolute playback URL under the public base URL (no trailing slash).
    pub fn audio_url(&self, base: &str) -> String {
        match self {
            AudioRef::Static(key) => format!("{base}/audio/{key}.mp3"),
            AudioRef::Synthesize(text) => {
                format!("{base}/voice/tts?text={}", urlencoding::encode(text))
            }
        }
    }
}

/// Resolve a line, optionally personalized with the callee's name.
pub fn resolve(line: Line, callee_name: Option<&str>) -> AudioRef {
    if let Some(name) = callee_name {
        if let Some(text) = line.personalized(name) {
            return AudioRef::Synthesize(text);
        }
    }
    match line.asset_key() {
        Some(key) => AudioRef::Static(key),
        None => AudioRef::Synthesize(line.text().to_string()),
    }
}

/// Resolve free text with no scripted counterpart, such as a fallback reply
/// or an operator-supplied message.
pub fn resolve_text(text: &str) -> AudioRef {
    AudioRef::Synthesize(text.to_string())
}
