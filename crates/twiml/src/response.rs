//! Voice response builder

use crate::escape;

/// Content type every control document is served with.
pub const CONTENT_TYPE: &str = "text/xml";

/// Parameters of a speech-listening window.
#[derive(Debug, Clone)]
pub struct GatherSpec {
    /// Webhook the recognized speech is posted to, step included.
    pub action: String,
    /// Recognition language, e.g. "es-ES".
    pub language: String,
    /// Seconds of silence tolerated after the question.
    pub timeout_secs: u64,
    /// Shorter window after the still-there re-prompt.
    pub reprompt_timeout_secs: u64,
    /// Audio URL of the still-there re-prompt.
    pub reprompt_url: String,
}

/// Builder for one control document.
#[derive(Debug, Default)]
pub struct VoiceResponse {
    body: String,
}

impl VoiceResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an audio URL for playback.
    pub fn play(mut self, url: &str) -> Self {
        self.body
            .push_str(&format!("<Play>{}</Play>", escape(url)));
        self
    }

    fn gather(mut self, spec: &GatherSpec, timeout_secs: u64) -> Self {
        self.body.push_str(&format!(
            r#"<Gather input="speech" language="{}" speechTimeout="auto" timeout="{}" action="{}" method="POST"/>"#,
            escape(&spec.language),
            timeout_secs,
            escape(&spec.action),
        ));
        self
    }

    /// Listen for the caller's next utterance, recover once from silence,
    /// then hang up. Terminal: nothing may be appended after this.
    pub fn listen(self, spec: &GatherSpec) -> String {
        let reprompt_url = spec.reprompt_url.clone();
        self.gather(spec, spec.timeout_secs)
            .play(&reprompt_url)
            .gather(spec, spec.reprompt_timeout_secs)
            .hangup()
    }

    /// End the call. Terminal.
    pub fn hangup(mut self) -> String {
        self.body.push_str("<Hangup/>");
        self.finish()
    }

    fn finish(self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><Response>{}</Response>"#,
            self.body
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gather() -> GatherSpec {
        GatherSpec {
            action: "https://example.com/voice/respond?step=invoice-check".to_string(),
            language: "es-ES".to_string(),
            timeout_secs: 5,
            reprompt_timeout_secs: 4,
            reprompt_url: "https://example.com/audio/sigues_ahi.mp3".to_string(),
        }
    }

    #[test]
    fn terminating_document_plays_then_hangs_up() {
        let xml = VoiceResponse::new()
            .play("https://example.com/audio/adios.mp3")
            .hangup();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?><Response>"#));
        assert!(xml.ends_with("<Hangup/></Response>"));
        assert!(!xml.contains("<Gather"));
    }

    #[test]
    fn continuing_document_recovers_from_silence_once() {
        let xml = VoiceResponse::new()
            .play("https://example.com/audio/factura.mp3")
            .listen(&gather());

        assert_eq!(xml.matches("<Gather").count(), 2);
        assert_eq!(xml.matches("sigues_ahi").count(), 1);
        assert!(xml.ends_with("<Hangup/></Response>"));

        // Question, first listen, re-prompt, second listen, hangup, in order.
        let first_gather = xml.find("<Gather").unwrap();
        let reprompt = xml.find("sigues_ahi").unwrap();
        let last_gather = xml.rfind("<Gather").unwrap();
        let hangup = xml.find("<Hangup/>").unwrap();
        assert!(xml.find("factura").unwrap() < first_gather);
        assert!(first_gather < reprompt);
        assert!(reprompt < last_gather);
        assert!(last_gather < hangup);
    }

    #[test]
    fn reprompt_window_is_shorter() {
        let xml = VoiceResponse::new().listen(&gather());
        assert!(xml.contains(r#"timeout="5""#));
        assert!(xml.contains(r#"timeout="4""#));
    }

    #[test]
    fn gather_carries_the_recognition_contract() {
        let xml = VoiceResponse::new().listen(&gather());
        assert!(xml.contains(r#"input="speech""#));
        assert!(xml.contains(r#"language="es-ES""#));
        assert!(xml.contains(r#"speechTimeout="auto""#));
        assert!(xml.contains(r#"method="POST""#));
        assert!(xml.contains("step=invoice-check"));
    }

    #[test]
    fn interpolated_urls_are_escaped() {
        let xml = VoiceResponse::new()
            .play("https://example.com/voice/tts?text=a&name=b")
            .hangup();
        assert!(xml.contains("text=a&amp;name=b"));
        assert!(!xml.contains("a&name"));
    }
}
