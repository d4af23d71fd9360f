//! Shared test utilities

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use sales_voice::config::Config;
use sales_voice::logger::{Logger, SharedLogger};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Marker that only shows up in the classifier instructions.
pub const CLASSIFIER_MARKER: &str = "You classify the emotional tone";
/// Marker that only shows up in the sales persona.
pub const PERSONA_MARKER: &str = "You are Mia";

pub const FAKE_MP3: &[u8] = b"ID3\x04\x00\x00\x00\x00\x00\x00fake-mp3-frames";

/// A tiny but well-formed looking WAV clip.
#[must_use]
pub fn wav_clip() -> Vec<u8> {
    let mut clip = b"RIFF\x24\x00\x00\x00WAVEfmt \x10\x00\x00\x00".to_vec();
    clip.extend(std::iter::repeat_n(0u8, 32));
    clip
}

/// Config pointing every provider call at the mock server.
#[must_use]
pub fn test_config(server: &MockServer) -> Config {
    let mut config = Config::with_defaults("sk-test".to_owned());
    config.openai_base_url = format!("{}/v1", server.uri());
    config
}

#[must_use]
pub fn responses_body(text: &str) -> serde_json::Value {
    json!({
        "id": "resp_test",
        "object": "response",
        "status": "completed",
        "output": [{
            "type": "message",
            "id": "msg_test",
            "role": "assistant",
            "status": "completed",
            "content": [{"type": "output_text", "text": text, "annotations": []}]
        }]
    })
}

/// What the mocked provider answers with.
pub struct Script<'a> {
    pub transcript: &'a str,
    pub emotion: &'a str,
    pub reply: &'a str,
}

impl Default for Script<'_> {
    fn default() -> Self {
        Self {
            transcript: "I'm so stressed about my hair",
            emotion: "stressed",
            reply: "Don't worry, that's very common. Our Argan Repair Oil will help.",
        }
    }
}

pub async fn mount_transcription(server: &MockServer, transcript: &str) {
    Mock::given(method("POST"))
        .and(path("/v1/audio/transcriptions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "task": "transcribe",
            "language": "english",
            "duration": 1.5,
            "text": transcript,
        })))
        .mount(server)
        .await;
}

pub async fn mount_classifier(server: &MockServer, emotion: &str) {
    Mock::given(method("POST"))
        .and(path("/v1/responses"))
        .and(body_string_contains(CLASSIFIER_MARKER))
        .respond_with(ResponseTemplate::new(200).set_body_json(responses_body(emotion)))
        .mount(server)
        .await;
}

pub async fn mount_reply(server: &MockServer, reply: &str) {
    Mock::given(method("POST"))
        .and(path("/v1/responses"))
        .and(body_string_contains(PERSONA_MARKER))
        .respond_with(ResponseTemplate::new(200).set_body_json(responses_body(reply)))
        .mount(server)
        .await;
}

pub async fn mount_speech(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/audio/speech"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "audio/mpeg")
                .set_body_bytes(FAKE_MP3),
        )
        .mount(server)
        .await;
}

/// Mounts a provider that answers every stage successfully.
pub async fn mount_provider(server: &MockServer, script: &Script<'_>) {
    mount_transcription(server, script.transcript).await;
    mount_classifier(server, script.emotion).await;
    mount_reply(server, script.reply).await;
    mount_speech(server).await;
}

/// Bodies of the requests the mock server saw on `endpoint`, as text.
pub async fn bodies_sent_to(server: &MockServer, endpoint: &str) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.url.path() == endpoint)
        .map(|r| String::from_utf8_lossy(&r.body).into_owned())
        .collect()
}

pub async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.unwrap_or_default().len()
}

/// Prints through the test harness so output only shows for failing tests.
pub struct TestLogger;

impl Logger for TestLogger {
    fn debug(&self, _msg: &str) {}

    fn info(&self, msg: &str) {
        println!("INFO {msg}");
    }

    fn warn(&self, msg: &str) {
        println!("WARN {msg}");
    }

    fn error(&self, msg: &str) {
        println!("ERROR {msg}");
    }
}

#[must_use]
pub fn quiet_logger() -> SharedLogger {
    Arc::new(Mutex::new(TestLogger))
}
