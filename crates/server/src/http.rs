//! HTTP endpoints
//!
//! Provider-facing webhooks and the operator-facing call API. The turn
//! webhooks (`/voice/respond`, `/voice/incoming`, `/voice/outgoing-script`,
//! `/voice/status`) never answer with an error status; malformed input
//! degrades to the entry step and the scripted re-prompt.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use dialogo_audio::{resolver, AudioError};
use dialogo_core::{Direction, Intent, StepId};
use dialogo_engine::{classify, entry, transition};
use dialogo_twiml::CONTENT_TYPE;

use crate::state::AppState;
use crate::turn;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let audio_dir = state.config.voice.audio_dir.clone();
    Router::new()
        .route("/voice/respond", post(respond))
        .route("/voice/incoming", post(incoming))
        .route("/voice/outgoing-script", get(outgoing_script).post(outgoing_script))
        .route("/voice/tts", get(tts_cached).post(tts_uncached))
        .route("/voice/outgoing", post(outgoing))
        .route("/voice/status", post(call_status))
        .route("/health", get(health))
        .nest_service("/audio", ServeDir::new(audio_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn xml(body: String) -> Response {
    ([(header::CONTENT_TYPE, CONTENT_TYPE)], body).into_response()
}

#[derive(Deserialize, Default)]
struct RespondQuery {
    step: Option<String>,
}

/// Provider speech-recognition result. Unknown fields are ignored; the
/// provider posts many more than these.
#[derive(Deserialize, Default)]
struct TurnForm {
    #[serde(rename = "SpeechResult", default)]
    speech_result: Option<String>,

    #[serde(rename = "CallSid", default)]
    call_sid: Option<String>,
}

/// Per-turn webhook: classify the transcript at the pending step, decide,
/// and answer with the next control document.
async fn respond(
    State(state): State<AppState>,
    query: Option<Query<RespondQuery>>,
    form: Option<Form<TurnForm>>,
) -> Response {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let form = form.map(|Form(f)| f).unwrap_or_default();

    let step = StepId::parse_or_entry(query.step.as_deref());
    let transcript = form.speech_result.unwrap_or_default();
    let intent = classify(&transcript, step);
    info!(
        call_sid = form.call_sid.as_deref().unwrap_or("-"),
        step = step.as_str(),
        ?intent,
        chars = transcript.len(),
        "turn received"
    );

    // A fallback reply can only play through the synthesis endpoint, so it
    // is skipped when synthesis is unavailable.
    if intent == Intent::Unrecognized && !transcript.trim().is_empty() && state.synth.is_some() {
        if let Some(fallback) = &state.fallback {
            match fallback.reply(&transcript).await {
                Ok(reply) => {
                    let audio = resolver::resolve_text(&reply);
                    return xml(turn::render_refs(&state.config, &[audio], Some(step)));
                }
                Err(error) => warn!(%error, "fallback failed, replaying scripted line"),
            }
        }
    }

    let decision = transition(step, intent);
    xml(turn::render_decision(&state.config, &decision, None))
}

/// Inbound entry document.
async fn incoming(State(state): State<AppState>) -> Response {
    let (step, opening) = entry(Direction::Inbound);
    xml(turn::render_entry(
        &state.config,
        opening,
        step,
        None,
        None,
        state.synth.is_some(),
    ))
}

#[derive(Deserialize, Default)]
struct ScriptQuery {
    name: Option<String>,
    message: Option<String>,
}

/// Outbound entry document, served when the callee picks up. `name`
/// personalizes the opening pitch; `message` replaces it entirely.
async fn outgoing_script(
    State(state): State<AppState>,
    query: Option<Query<ScriptQuery>>,
) -> Response {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let (step, opening) = entry(Direction::Outbound);
    xml(turn::render_entry(
        &state.config,
        opening,
        step,
        query.name.as_deref(),
        query.message.as_deref(),
        state.synth.is_some(),
    ))
}

#[derive(Deserialize, Default)]
struct TtsQuery {
    text: Option<String>,
}

#[derive(Deserialize)]
struct TtsBody {
    text: String,
}

fn synthesis_failure(error: AudioError) -> Response {
    warn!(%error, "synthesis failed");
    (
        StatusCode::BAD_GATEWAY,
        Json(json!({ "error": error.to_string() })),
    )
        .into_response()
}

/// Cached synthesis fetch; the URL embedded in control documents.
async fn tts_cached(State(state): State<AppState>, query: Option<Query<TtsQuery>>) -> Response {
    let text = query.and_then(|Query(q)| q.text).unwrap_or_default();
    if text.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "missing text parameter" })),
        )
            .into_response();
    }
    let Some(synth) = &state.synth else {
        return synthesis_failure(AudioError::MissingCredential("synthesis.api_key"));
    };
    match synth.fetch(&text).await {
        Ok(bytes) => {
            // HTTP caches must not outlive the byte cache.
            let cache_control = format!("public, max-age={}", state.config.synthesis.cache_ttl_secs);
            (
                [
                    (header::CONTENT_TYPE, "audio/mpeg".to_string()),
                    (header::CACHE_CONTROL, cache_control),
                ],
                bytes,
            )
                .into_response()
        }
        Err(error) => synthesis_failure(error),
    }
}

/// One-off synthesis preview, bypassing the cache.
async fn tts_uncached(State(state): State<AppState>, Json(body): Json<TtsBody>) -> Response {
    if body.text.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "missing text" })),
        )
            .into_response();
    }
    let Some(synth) = &state.synth else {
        return synthesis_failure(AudioError::MissingCredential("synthesis.api_key"));
    };
    match synth.fetch_uncached(&body.text).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "audio/mpeg")], bytes).into_response(),
        Err(error) => synthesis_failure(error),
    }
}

#[derive(Deserialize)]
struct OutgoingRequest {
    to: String,
    callee_name: Option<String>,
    custom_message: Option<String>,
}

/// Place an outbound call.
async fn outgoing(
    State(state): State<AppState>,
    Json(request): Json<OutgoingRequest>,
) -> Response {
    if request.to.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "missing destination number" })),
        )
            .into_response();
    }
    let Some(telephony) = &state.telephony else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": "telephony credentials not configured" })),
        )
            .into_response();
    };

    let base = &state.config.voice.public_base_url;
    let mut params = Vec::new();
    if let Some(name) = request.callee_name.as_deref().filter(|n| !n.trim().is_empty()) {
        params.push(format!("name={}", urlencoding::encode(name)));
    }
    if let Some(message) = request.custom_message.as_deref().filter(|m| !m.trim().is_empty()) {
        params.push(format!("message={}", urlencoding::encode(message)));
    }
    let mut answer_url = format!("{base}/voice/outgoing-script");
    if !params.is_empty() {
        answer_url = format!("{answer_url}?{}", params.join("&"));
    }
    let status_url = format!("{base}/voice/status");

    match telephony.create_call(&request.to, &answer_url, &status_url).await {
        Ok(call_sid) => Json(json!({ "call_sid": call_sid })).into_response(),
        Err(error) => {
            warn!(%error, to = %request.to, "outbound call failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": error.to_string() })),
            )
                .into_response()
        }
    }
}

/// Lifecycle webhook. Always 200; the provider retries non-success and
/// there is nothing to retry here.
async fn call_status(form: Option<Form<dialogo_telephony::CallStatusEvent>>) -> StatusCode {
    match form {
        Some(Form(event)) => {
            info!(
                call_sid = %event.call_sid,
                status = ?event.call_status,
                duration = event.call_duration.as_deref().unwrap_or("-"),
                "call status"
            );
        }
        None => warn!("unparseable status callback"),
    }
    StatusCode::OK
}

/// Health check
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
