//! Telephony provider integration
//!
//! Twilio-style REST client for placing outbound calls, plus the webhook
//! event types the provider posts back over a call's lifecycle.

pub mod client;
pub mod status;

pub use client::TwilioClient;
pub use status::{CallStatus, CallStatusEvent};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TelephonyError {
    #[error("telephony credential missing: {0}")]
    MissingCredential(&'static str),

    #[error("provider request failed: {0}")]
    Provider(String),
}
