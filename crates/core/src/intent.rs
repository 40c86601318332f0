//! Caller intents
//!
//! The closed set of meanings a recognized turn can carry. Exactly one intent
//! is selected per turn; free text that matches nothing is `Unrecognized`,
//! never an error.

use serde::{Deserialize, Serialize};

/// Classified meaning of one spoken turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Agreement: "sí", "vale", "claro", ...
    Affirm,
    /// Refusal of the current question, not of the whole call.
    Deny,
    /// The caller wants out: "no me interesa", "adiós", ...
    Reject,
    /// "¿Quién eres?"
    AskWhoAreYou,
    /// "¿Cuánto cuesta?"
    AskCost,
    /// "¿Cómo funciona?"
    AskHowItWorks,
    /// Speech carrying digits, in steps that expect them.
    ProvidesDigits,
    /// Nothing matched, or nothing was heard.
    Unrecognized,
}

impl Intent {
    /// Objections are answered in place: the state machine replies and
    /// re-enters the same step, never advancing progress.
    pub fn is_objection(&self) -> bool {
        matches!(
            self,
            Intent::AskWhoAreYou | Intent::AskCost | Intent::AskHowItWorks
        )
    }
}
