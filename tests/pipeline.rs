//! Voice turn tests against a mocked provider

use sales_voice::pipeline::{PipelineError, TurnOutcome, VoicePipeline};
use sales_voice::session::{Author, SessionContext};
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::{
    FAKE_MP3, Script, bodies_sent_to, mount_classifier, mount_provider, mount_reply,
    mount_transcription, quiet_logger, request_count, test_config, wav_clip,
};

fn new_session() -> SessionContext {
    SessionContext::new(Uuid::new_v4())
}

#[tokio::test]
async fn stressed_customer_gets_a_reassuring_spoken_reply() {
    let server = MockServer::start().await;
    let script = Script::default();
    mount_provider(&server, &script).await;

    let pipeline = VoicePipeline::from_config(&test_config(&server), quiet_logger()).unwrap();
    let mut session = new_session();

    let outcome = pipeline.run_turn(&mut session, &wav_clip()).await.unwrap();
    let TurnOutcome::Completed(turn) = outcome else {
        panic!("expected a completed turn");
    };

    assert_eq!(turn.transcript, "I'm so stressed about my hair");
    assert_eq!(turn.language.as_deref(), Some("english"));
    assert_eq!(turn.emotion, "stressed");
    assert_eq!(turn.reply, script.reply);
    assert_eq!(turn.audio.audio, FAKE_MP3);
    assert!(turn.audio_html.contains("autoplay"));
    assert!(turn.audio_html.contains("data:audio/mpeg;base64,"));

    let turns = session.memory().turns();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0].role(), Author::User);
    assert_eq!(turns[0].content(), "I'm so stressed about my hair");
    assert_eq!(turns[1].role(), Author::Assistant);
    assert_eq!(turns[1].content(), script.reply);
    assert_eq!(session.voice_usage(), 1);

    let responses = bodies_sent_to(&server, "/v1/responses").await;
    assert_eq!(responses.len(), 2);
    let classify: serde_json::Value = serde_json::from_str(&responses[0]).unwrap();
    assert_eq!(classify["temperature"], 0.0);
    let reply: serde_json::Value = serde_json::from_str(&responses[1]).unwrap();
    let instructions = reply["instructions"].as_str().unwrap();
    assert!(instructions.contains("The customer sounds stressed"));
    assert!(instructions.contains("Always answer in english."));
    assert!((reply["temperature"].as_f64().unwrap() - 0.4).abs() < 1e-6);

    let speech = bodies_sent_to(&server, "/v1/audio/speech").await;
    let speech: serde_json::Value = serde_json::from_str(&speech[0]).unwrap();
    assert_eq!(speech["input"], script.reply);
    assert_eq!(speech["voice"], "nova");
}

#[tokio::test]
async fn unknown_emotion_means_no_tone_hint() {
    let server = MockServer::start().await;
    mount_provider(
        &server,
        &Script {
            emotion: "Bewildered",
            ..Script::default()
        },
    )
    .await;

    let pipeline = VoicePipeline::from_config(&test_config(&server), quiet_logger()).unwrap();
    let mut session = new_session();
    let TurnOutcome::Completed(turn) = pipeline.run_turn(&mut session, &wav_clip()).await.unwrap()
    else {
        panic!("expected a completed turn");
    };
    assert_eq!(turn.emotion, "bewildered");

    let responses = bodies_sent_to(&server, "/v1/responses").await;
    let reply: serde_json::Value = serde_json::from_str(&responses[1]).unwrap();
    let instructions = reply["instructions"].as_str().unwrap();
    assert!(!instructions.contains("The customer sounds"));
}

#[tokio::test]
async fn later_turns_resend_the_conversation() {
    let server = MockServer::start().await;
    mount_provider(&server, &Script::default()).await;

    let pipeline = VoicePipeline::from_config(&test_config(&server), quiet_logger()).unwrap();
    let mut session = new_session();
    pipeline.run_turn(&mut session, &wav_clip()).await.unwrap();
    pipeline.run_turn(&mut session, &wav_clip()).await.unwrap();

    assert_eq!(session.memory().len(), 4);

    let replies: Vec<serde_json::Value> = bodies_sent_to(&server, "/v1/responses")
        .await
        .iter()
        .map(|b| serde_json::from_str(b).unwrap())
        .filter(|b: &serde_json::Value| {
            b["instructions"].as_str().unwrap().contains("You are Mia")
        })
        .collect();
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0]["input"].as_array().unwrap().len(), 1);
    let second = replies[1]["input"].as_array().unwrap();
    assert_eq!(second.len(), 3);
    assert_eq!(second[0]["role"], "user");
    assert_eq!(second[1]["role"], "assistant");
    assert_eq!(second[2]["role"], "user");
}

#[tokio::test]
async fn eleventh_submission_is_rejected_without_calling_the_provider() {
    let server = MockServer::start().await;
    mount_provider(&server, &Script::default()).await;

    let pipeline = VoicePipeline::from_config(&test_config(&server), quiet_logger()).unwrap();
    let mut session = new_session();

    for n in 1..=10 {
        let outcome = pipeline.run_turn(&mut session, &wav_clip()).await.unwrap();
        assert!(matches!(outcome, TurnOutcome::Completed(_)));
        assert_eq!(session.voice_usage(), n);
        assert_eq!(session.memory().len(), 2 * n as usize);
    }
    let calls_before = request_count(&server).await;
    assert_eq!(calls_before, 40);

    let outcome = pipeline.run_turn(&mut session, &wav_clip()).await.unwrap();
    let TurnOutcome::LimitReached { warning } = outcome else {
        panic!("expected the limit warning");
    };
    assert!(warning.contains("10 voice messages"));
    assert_eq!(request_count(&server).await, calls_before);
    assert_eq!(session.voice_usage(), 10);
    assert_eq!(session.memory().len(), 20);
}

#[tokio::test]
async fn failed_synthesis_leaves_memory_untouched() {
    let server = MockServer::start().await;
    let script = Script::default();
    mount_transcription(&server, script.transcript).await;
    mount_classifier(&server, script.emotion).await;
    mount_reply(&server, script.reply).await;
    Mock::given(method("POST"))
        .and(path("/v1/audio/speech"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let pipeline = VoicePipeline::from_config(&test_config(&server), quiet_logger()).unwrap();
    let mut session = new_session();

    let err = pipeline
        .run_turn(&mut session, &wav_clip())
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::Synthesis(_)));
    assert_eq!(err.stage(), "synthesis");
    assert!(err.to_string().contains("upstream exploded"));

    assert!(session.memory().is_empty());
    // the submission itself was accepted
    assert_eq!(session.voice_usage(), 1);
}

#[tokio::test]
async fn empty_synthesized_audio_is_a_failure() {
    let server = MockServer::start().await;
    let script = Script::default();
    mount_transcription(&server, script.transcript).await;
    mount_classifier(&server, script.emotion).await;
    mount_reply(&server, script.reply).await;
    Mock::given(method("POST"))
        .and(path("/v1/audio/speech"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let pipeline = VoicePipeline::from_config(&test_config(&server), quiet_logger()).unwrap();
    let mut session = new_session();
    let err = pipeline
        .run_turn(&mut session, &wav_clip())
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::Synthesis(_)));
    assert!(session.memory().is_empty());
}

#[tokio::test]
async fn rate_limited_reply_aborts_the_turn() {
    let server = MockServer::start().await;
    let script = Script::default();
    mount_transcription(&server, script.transcript).await;
    mount_classifier(&server, script.emotion).await;
    Mock::given(method("POST"))
        .and(path("/v1/responses"))
        .and(wiremock::matchers::body_string_contains("You are Mia"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let pipeline = VoicePipeline::from_config(&test_config(&server), quiet_logger()).unwrap();
    let mut session = new_session();
    let err = pipeline
        .run_turn(&mut session, &wav_clip())
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::Generation(_)));
    assert!(session.memory().is_empty());
    assert!(bodies_sent_to(&server, "/v1/audio/speech").await.is_empty());
}

#[tokio::test]
async fn undecodable_audio_never_reaches_the_provider() {
    let server = MockServer::start().await;
    mount_provider(&server, &Script::default()).await;

    let pipeline = VoicePipeline::from_config(&test_config(&server), quiet_logger()).unwrap();
    let mut session = new_session();
    let err = pipeline
        .run_turn(&mut session, b"definitely not audio")
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::Transcription(_)));
    assert_eq!(request_count(&server).await, 0);
    assert!(session.memory().is_empty());
}

#[tokio::test]
async fn silence_is_a_transcription_failure() {
    let server = MockServer::start().await;
    mount_provider(
        &server,
        &Script {
            transcript: "   ",
            ..Script::default()
        },
    )
    .await;

    let pipeline = VoicePipeline::from_config(&test_config(&server), quiet_logger()).unwrap();
    let mut session = new_session();
    let err = pipeline
        .run_turn(&mut session, &wav_clip())
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::Transcription(_)));
    assert_eq!(request_count(&server).await, 1);
}
