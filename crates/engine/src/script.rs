//! Dialogue state machine
//!
//! A pure transition table over (step, intent). Two global rules sit above
//! the per-step entries:
//! - `Reject` terminates from every step, no exceptions
//! - objections are answered in place and never move the step
//!
//! Unmatched turns replay the step's question; the engine never errors a
//! live call.

use dialogo_core::{Decision, Direction, Intent, Line, StepId};

/// The entry point of a call: its first step and first line.
pub fn entry(direction: Direction) -> (StepId, Line) {
    match direction {
        Direction::Outbound => (StepId::Greeting, Line::OpeningPitch),
        Direction::Inbound => (StepId::Greeting, Line::InboundGreeting),
    }
}

/// The line replayed when a turn could not be understood.
pub fn repeat_line(step: StepId) -> Line {
    match step {
        StepId::Greeting => Line::DidNotCatch,
        _ => Line::RepeatPlease,
    }
}

/// Decide the next turn from the pending step and the classified intent.
pub fn transition(step: StepId, intent: Intent) -> Decision {
    if intent == Intent::Reject {
        return Decision::Terminate {
            lines: vec![Line::Farewell],
        };
    }
    if let Some(answer) = objection_answer(intent) {
        return Decision::Continue {
            next: step,
            lines: vec![answer],
        };
    }

    match (step, intent) {
        (StepId::Greeting, Intent::Affirm) => Decision::Continue {
            next: StepId::TitleholderCheck,
            lines: vec![Line::AskTitleholder],
        },
        // "Now is a bad time" is a scheduling problem, not a refusal.
        (StepId::Greeting, Intent::Deny) => Decision::Continue {
            next: StepId::CallbackTime,
            lines: vec![Line::AskCallbackTime],
        },

        (StepId::TitleholderCheck, Intent::Affirm) => Decision::Continue {
            next: StepId::InvoiceCheck,
            lines: vec![Line::AskInvoice],
        },
        (StepId::TitleholderCheck, Intent::Deny) => Decision::Terminate {
            lines: vec![Line::FarewellTitleholder],
        },

        (StepId::InvoiceCheck, Intent::Affirm) => Decision::Terminate {
            lines: vec![Line::Close],
        },
        (StepId::InvoiceCheck, Intent::Deny) => Decision::Terminate {
            lines: vec![Line::FarewellInvoice],
        },

        (StepId::CallbackTime, Intent::Affirm | Intent::ProvidesDigits) => Decision::Terminate {
            lines: vec![Line::FarewellCallback],
        },
        (StepId::CallbackTime, Intent::Deny) => Decision::Terminate {
            lines: vec![Line::FarewellWhatsapp],
        },

        (step, _) => Decision::Continue {
            next: step,
            lines: vec![repeat_line(step)],
        },
    }
}

fn objection_answer(intent: Intent) -> Option<Line> {
    match intent {
        Intent::AskWhoAreYou => Some(Line::WhoWeAre),
        Intent::AskCost => Some(Line::NoCost),
        Intent::AskHowItWorks => Some(Line::HowItWorks),
        _ => None,
    }
}
