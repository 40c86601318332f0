//! Transcript normalization
//!
//! Speech-to-text output is noisy and inconsistently cased. All matching
//! downstream happens on the normalized form.

/// Lowercase and trim a raw transcript.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Split a normalized transcript into words. Punctuation from the
/// recognizer ("¿cuánto cuesta?") is stripped at the boundaries.
pub fn words(normalized: &str) -> impl Iterator<Item = &str> {
    normalized
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
}
