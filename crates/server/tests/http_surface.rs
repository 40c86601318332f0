//! Router-level tests over the webhook surface. No network: optional
//! integrations stay unconfigured and the handlers must degrade cleanly.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use bytes::Bytes;
use dialogo_audio::{AudioError, CachedSynthesizer, TtsGateway};
use dialogo_config::Settings;
use dialogo_engine::{EngineError, FallbackResponder};
use dialogo_server::{create_router, AppState};
use tower::ServiceExt;

fn settings() -> Settings {
    let mut config = Settings::default();
    config.voice.public_base_url = "https://example.com".to_string();
    config
}

fn app() -> Router {
    create_router(AppState::new(settings()).expect("state without credentials"))
}

struct StubGateway;

#[async_trait]
impl TtsGateway for StubGateway {
    async fn synthesize(&self, _text: &str) -> Result<Bytes, AudioError> {
        Ok(Bytes::from_static(b"mp3"))
    }
}

fn app_with_synthesis(cache_ttl_secs: u64) -> Router {
    let mut config = settings();
    config.synthesis.cache_ttl_secs = cache_ttl_secs;
    let synth = CachedSynthesizer::new(
        Arc::new(StubGateway),
        Duration::from_secs(cache_ttl_secs),
        config.synthesis.cache_max_entries,
    );
    let state = AppState {
        config: Arc::new(config),
        synth: Some(Arc::new(synth)),
        telephony: None,
        fallback: None,
    };
    create_router(state)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, String, Option<String>) {
    let response = app.oneshot(request).await.expect("request handled");
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8_lossy(&bytes).to_string(), content_type)
}

fn form_post(uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

struct CannedFallback;

#[async_trait]
impl FallbackResponder for CannedFallback {
    async fn reply(&self, _transcript: &str) -> Result<String, EngineError> {
        Ok("Claro, ¿eres el titular?".to_string())
    }
}

#[tokio::test]
async fn fallback_is_skipped_when_its_reply_could_not_be_played() {
    // The fallback reply plays through /voice/tts; without synthesis the
    // scripted re-prompt is the only audio that can actually be served.
    let state = AppState {
        config: Arc::new(settings()),
        synth: None,
        telephony: None,
        fallback: Some(Arc::new(CannedFallback)),
    };
    let request = form_post(
        "/voice/respond?step=greeting",
        "SpeechResult=eh%20pues%20mira",
    );
    let (status, body, _) = send(create_router(state), request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/audio/no_entendi.mp3"));
    assert!(!body.contains("/voice/tts"));
}

#[tokio::test]
async fn respond_with_no_body_replays_the_entry_question() {
    let request = Request::builder()
        .method("POST")
        .uri("/voice/respond")
        .body(Body::empty())
        .unwrap();
    let (status, body, content_type) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/xml"));
    assert!(body.contains("/audio/no_entendi.mp3"));
    assert!(body.contains("step=greeting"));
}

#[tokio::test]
async fn affirmative_turn_advances_to_the_titleholder_question() {
    let request = form_post(
        "/voice/respond?step=greeting",
        "SpeechResult=s%C3%AD&CallSid=CA0123",
    );
    let (status, body, _) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/audio/titular.mp3"));
    assert!(body.contains("step=titleholder-check"));
}

#[tokio::test]
async fn rejection_hangs_up_without_listening() {
    let request = form_post(
        "/voice/respond?step=invoice-check",
        "SpeechResult=no%20me%20interesa%2C%20adi%C3%B3s",
    );
    let (status, body, _) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/audio/adios.mp3"));
    assert!(body.ends_with("<Hangup/></Response>"));
    assert!(!body.contains("<Gather"));
}

#[tokio::test]
async fn forged_step_degrades_to_the_entry_step() {
    let request = form_post("/voice/respond?step=step-7", "SpeechResult=s%C3%AD");
    let (status, body, _) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("step=titleholder-check"));
}

#[tokio::test]
async fn incoming_call_gets_the_inbound_greeting() {
    let request = Request::builder()
        .method("POST")
        .uri("/voice/incoming")
        .body(Body::empty())
        .unwrap();
    let (status, body, content_type) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/xml"));
    assert!(body.contains("/audio/incoming.mp3"));
    assert!(body.contains("step=greeting"));
}

#[tokio::test]
async fn outgoing_script_personalizes_the_pitch() {
    let request = Request::builder()
        .method("GET")
        .uri("/voice/outgoing-script?name=Juan")
        .body(Body::empty())
        .unwrap();
    let (status, body, _) = send(app_with_synthesis(300), request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/voice/tts?text="));
    assert!(body.contains("Juan"));
}

#[tokio::test]
async fn outgoing_script_drops_personalization_without_synthesis() {
    // A personalized pitch would play through /voice/tts, which cannot be
    // served without a synthesis backend. The call must still get playable
    // audio, not a URL that answers 502 mid-call.
    let request = Request::builder()
        .method("GET")
        .uri("/voice/outgoing-script?name=Juan&message=Hola")
        .body(Body::empty())
        .unwrap();
    let (status, body, _) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/audio/saludo.mp3"));
    assert!(!body.contains("/voice/tts"));
}

#[tokio::test]
async fn outgoing_script_without_a_name_uses_the_static_pitch() {
    let request = Request::builder()
        .method("GET")
        .uri("/voice/outgoing-script")
        .body(Body::empty())
        .unwrap();
    let (_, body, _) = send(app(), request).await;

    assert!(body.contains("/audio/saludo.mp3"));
}

#[tokio::test]
async fn tts_without_text_is_a_client_error() {
    let request = Request::builder()
        .method("GET")
        .uri("/voice/tts")
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn tts_without_a_key_reports_upstream_failure() {
    let request = Request::builder()
        .method("GET")
        .uri("/voice/tts?text=hola")
        .body(Body::empty())
        .unwrap();
    let (status, body, _) = send(app(), request).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("error"));
}

#[tokio::test]
async fn tts_cache_header_follows_the_configured_ttl() {
    let request = Request::builder()
        .method("GET")
        .uri("/voice/tts?text=hola")
        .body(Body::empty())
        .unwrap();
    let response = app_with_synthesis(120)
        .oneshot(request)
        .await
        .expect("request handled");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "audio/mpeg"
    );
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "public, max-age=120"
    );
}

#[tokio::test]
async fn outgoing_without_credentials_is_unavailable() {
    let request = Request::builder()
        .method("POST")
        .uri("/voice/outgoing")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"to":"+34600000001"}"#))
        .unwrap();
    let (status, _, _) = send(app(), request).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn status_webhook_always_acknowledges() {
    let request = form_post(
        "/voice/status",
        "CallSid=CA0123&CallStatus=completed&CallDuration=42",
    );
    let (status, _, _) = send(app(), request).await;
    assert_eq!(status, StatusCode::OK);

    let request = Request::builder()
        .method("POST")
        .uri("/voice/status")
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(app(), request).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn health_reports_ok() {
    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, body, _) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("\"status\":\"ok\""));
}
