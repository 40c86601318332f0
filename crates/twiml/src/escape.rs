//! XML escaping
//!
//! Synthesis URLs embed caller-influenced text, so every interpolated value
//! is escaped. The five XML-significant characters are replaced; everything
//! else passes through untouched, including non-ASCII Spanish text.

/// Escape a value for use in XML text content or attribute values.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
