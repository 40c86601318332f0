//! Dialogue steps
//!
//! A step is a named node in the dialogue graph: "what question is currently
//! pending." The step is the only conversational state the engine keeps, and
//! it lives entirely in the callback URL the telephony provider echoes back
//! each turn. The engine itself holds nothing between turns.

use serde::{Deserialize, Serialize};

/// Call direction. Inbound and outbound scripts share all transition logic
/// and differ only in their entry utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Inbound,
    Outbound,
}

/// A node in the dialogue graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[derive(Default)]
pub enum StepId {
    /// Awaiting the reply to the opening pitch.
    #[default]
    Greeting,
    /// Asked whether the caller holds the electricity contract.
    TitleholderCheck,
    /// Asked whether the caller has their bill at hand.
    InvoiceCheck,
    /// Caller is busy; asked what time suits a callback.
    CallbackTime,
}

/// Every step, for exhaustive invariant checks.
pub const ALL_STEPS: [StepId; 4] = [
    StepId::Greeting,
    StepId::TitleholderCheck,
    StepId::InvoiceCheck,
    StepId::CallbackTime,
];

impl StepId {
    /// The value threaded through the callback URL.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepId::Greeting => "greeting",
            StepId::TitleholderCheck => "titleholder-check",
            StepId::InvoiceCheck => "invoice-check",
            StepId::CallbackTime => "callback-time",
        }
    }

    /// Parse a step value from a callback URL.
    ///
    /// A forged, stale, or missing value resolves to the entry step rather
    /// than an error: the caller is live on the line and cannot retry a
    /// server error mid-call.
    pub fn parse_or_entry(value: Option<&str>) -> StepId {
        match value {
            Some("greeting") => StepId::Greeting,
            Some("titleholder-check") => StepId::TitleholderCheck,
            Some("invoice-check") => StepId::InvoiceCheck,
            Some("callback-time") => StepId::CallbackTime,
            _ => StepId::default(),
        }
    }

    /// Seconds the provider listens for speech after the step's question.
    pub fn listen_timeout_secs(&self) -> u64 {
        match self {
            // The opening pitch is long; give the caller a moment more.
            StepId::Greeting => 6,
            _ => 5,
        }
    }
}
