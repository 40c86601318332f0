//! Turn decisions

use crate::{Line, StepId};
use serde::{Deserialize, Serialize};

/// What the state machine decided for one turn: which lines to play and
/// whether to keep listening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// Play the lines, then re-arm listening pointed at `next`.
    Continue { next: StepId, lines: Vec<Line> },
    /// Play the lines, then end the call.
    Terminate { lines: Vec<Line> },
}

impl Decision {
    /// The lines to play, in order.
    pub fn lines(&self) -> &[Line] {
        match self {
            Decision::Continue { lines, .. } => lines,
            Decision::Terminate { lines } => lines,
        }
    }

    /// The step listening re-arms on, if the call continues.
    pub fn next_step(&self) -> Option<StepId> {
        match self {
            Decision::Continue { next, .. } => Some(*next),
            Decision::Terminate { .. } => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Decision::Terminate { .. })
    }
}
