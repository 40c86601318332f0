//! Core vocabulary for the dialogue engine
//!
//! This crate provides the shared types used across all other crates:
//! - Dialogue steps and call direction
//! - Caller intents
//! - The scripted utterance catalogue
//! - Turn decisions
//!
//! Everything here is plain data: no I/O, no async, no shared state.

pub mod decision;
pub mod intent;
pub mod line;
pub mod step;
pub mod transcript;

pub use decision::Decision;
pub use intent::Intent;
pub use line::Line;
pub use step::{Direction, StepId};
pub use transcript::normalize;
