//! Intent classification
//!
//! Maps a raw recognized-speech string to one intent from the closed set,
//! evaluating rule groups in strict priority order:
//!
//! 1. Universal rejection phrases (terminate wins over everything)
//! 2. Universal objections (who-are-you / cost / how-it-works)
//! 3. Affirmation lexicon (whole-word tokens plus step-specific phrases)
//! 4. Negation, step-aware around the "no sé" politeness filler
//! 5. Digit-bearing speech, only where a step expects digits
//! 6. `Unrecognized`
//!
//! First match wins; overlaps resolve by group order, not by longest match.
//! The classifier never fails: empty input is `Unrecognized`.

use dialogo_core::{normalize, transcript, Intent, StepId};

/// Clear requests to end the call. A caller who says "no gracias" must never
/// be routed into a deeper sales branch, whatever the current step.
const REJECTION_PHRASES: &[&str] = &["no me interesa", "no gracias", "adiós", "adios", "déjalo", "dejalo"];

/// Whole-word affirmations, step-independent. Matched against words, not
/// substrings: "siete" must not read as "si".
const AFFIRM_WORDS: &[&str] = &[
    "sí", "si", "vale", "claro", "ok", "bueno", "adelante", "dime", "correcto",
];

/// Spelled-out digits, for callers who dictate a time in words.
const SPELLED_DIGITS: &[&str] = &[
    "cero", "uno", "dos", "tres", "cuatro", "cinco", "seis", "siete", "ocho", "nueve",
];

/// Classify one turn of recognized speech.
pub fn classify(raw_transcript: &str, step: StepId) -> Intent {
    let text = normalize(raw_transcript);
    if text.is_empty() {
        return Intent::Unrecognized;
    }

    if REJECTION_PHRASES.iter().any(|p| text.contains(p)) {
        return Intent::Reject;
    }

    if text.contains("quién") || text.contains("quien") {
        return Intent::AskWhoAreYou;
    }
    if text.contains("cómo funciona") || text.contains("como funciona") {
        return Intent::AskHowItWorks;
    }
    if text.contains("cuánto") || text.contains("cuanto") || text.contains("gratis") || text.contains("coste") {
        return Intent::AskCost;
    }

    let words: Vec<&str> = transcript::words(&text).collect();
    let has_no = words.iter().any(|w| *w == "no");

    if AFFIRM_WORDS.iter().any(|a| words.contains(a)) {
        return Intent::Affirm;
    }
    // Step-specific affirmation phrases only count in un-negated speech:
    // "tengo la factura" affirms, "no la tengo" must not.
    if !has_no && step_affirm_phrases(step).iter().any(|p| text.contains(p)) {
        return Intent::Affirm;
    }

    if has_no {
        let filler = text.contains("no sé") || text.contains("no se");
        if !(filler && no_se_is_filler(step)) {
            return Intent::Deny;
        }
        // "no sé" at a yes/no question is hesitation, not refusal; fall
        // through and let the step replay its question.
    }

    if expects_digits(step) && has_digits(&text, &words) {
        return Intent::ProvidesDigits;
    }

    Intent::Unrecognized
}

/// Phrases that affirm a specific step's question without any of the
/// universal yes-words.
fn step_affirm_phrases(step: StepId) -> &'static [&'static str] {
    match step {
        StepId::Greeting => &[],
        StepId::TitleholderCheck => &["soy yo", "yo soy", "titular"],
        StepId::InvoiceCheck => &["tengo", "aquí", "aqui", "papel", "móvil", "movil"],
        StepId::CallbackTime => &["mañana", "tarde", "noche", "luego", "hora"],
    }
}

/// Steps where "no sé" is a politeness filler rather than a refusal. At
/// `CallbackTime`, "no sé" genuinely means the caller cannot give a time.
fn no_se_is_filler(step: StepId) -> bool {
    matches!(
        step,
        StepId::Greeting | StepId::TitleholderCheck | StepId::InvoiceCheck
    )
}

/// Steps whose question expects a number or a time.
fn expects_digits(step: StepId) -> bool {
    matches!(step, StepId::CallbackTime)
}

fn has_digits(text: &str, words: &[&str]) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
        || words.iter().any(|w| SPELLED_DIGITS.contains(w))
}
