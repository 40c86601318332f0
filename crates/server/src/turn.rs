//! Turn rendering
//!
//! Bridges the engine's decisions to provider control documents: resolve
//! each line to an audio URL, then emit plays plus either a listening tail
//! (continue) or a hangup (terminate).

use dialogo_audio::{resolve, resolver, AudioRef};
use dialogo_config::Settings;
use dialogo_core::{Decision, Line, StepId};
use dialogo_twiml::{GatherSpec, VoiceResponse};

/// Render a decision for playback, personalizing lines when a callee name
/// is known.
pub fn render_decision(config: &Settings, decision: &Decision, callee_name: Option<&str>) -> String {
    let refs: Vec<AudioRef> = decision
        .lines()
        .iter()
        .map(|line| resolve(*line, callee_name))
        .collect();
    render_refs(config, &refs, decision.next_step())
}

/// Render resolved audio plus the step's listening tail, or a terminating
/// document when `next` is absent.
pub fn render_refs(config: &Settings, refs: &[AudioRef], next: Option<StepId>) -> String {
    let base = &config.voice.public_base_url;
    let mut response = VoiceResponse::new();
    for audio in refs {
        response = response.play(&audio.audio_url(base));
    }
    match next {
        Some(step) => response.listen(&gather_spec(config, step)),
        None => response.hangup(),
    }
}

fn gather_spec(config: &Settings, step: StepId) -> GatherSpec {
    let base = &config.voice.public_base_url;
    GatherSpec {
        action: format!("{base}/voice/respond?step={}", step.as_str()),
        language: config.voice.language.clone(),
        timeout_secs: step.listen_timeout_secs(),
        reprompt_timeout_secs: config.dialog.reprompt_timeout_secs,
        reprompt_url: resolve(Line::StillThere, None).audio_url(base),
    }
}

/// Render a call's entry document: the opening line, then listen on the
/// entry step. `message` overrides the scripted line entirely and
/// `callee_name` personalizes it; both require a synthesis round-trip, so
/// without a synthesis backend the entry drops to the static opening asset
/// rather than embedding a play URL that cannot be served.
pub fn render_entry(
    config: &Settings,
    opening: Line,
    step: StepId,
    callee_name: Option<&str>,
    message: Option<&str>,
    synthesis_available: bool,
) -> String {
    let audio = if !synthesis_available {
        resolve(opening, None)
    } else {
        match message {
            Some(text) if !text.trim().is_empty() => resolver::resolve_text(text),
            _ => resolve(opening, callee_name),
        }
    };
    render_refs(config, &[audio], Some(step))
}
