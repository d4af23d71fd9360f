//! The demo page and the JSON endpoints behind it.

mod page;

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use uuid::Uuid;

use crate::ai_providers::ChatModel;
use crate::logger::{SharedLogger, with_logger};
use crate::pipeline::{PipelineError, TurnOutcome, VoicePipeline};
use crate::session::{ChatTurn, SessionStore, SharedSession};

/// Header the page sends its session id in.
pub const SESSION_HEADER: &str = "x-session-id";

// The transcription endpoint takes files up to 25 MB.
const MAX_AUDIO_BYTES: usize = 25 * 1024 * 1024;

pub struct AppState {
    pub pipeline: VoicePipeline<ChatModel>,
    pub sessions: SessionStore,
    pub logger: SharedLogger,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/avatar.svg", get(avatar))
        .route("/health", get(health))
        .route("/api/session", get(session_info))
        .route("/api/session/reset", post(reset_session))
        .route("/api/voice", post(voice))
        .layer(DefaultBodyLimit::max(MAX_AUDIO_BYTES))
        .with_state(state)
}

/// Every page load is a new session, so a reload starts over.
async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let session_id = state.sessions.create().await;
    with_logger(&state.logger, |l| {
        l.debug(&format!("session {session_id}: opened"));
    });
    Html(page::render(session_id))
}

async fn avatar() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/svg+xml")], page::AVATAR_SVG)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct SessionResponse {
    messages: Vec<ChatTurn>,
    voice_usage: u32,
    voice_limit: u32,
}

async fn session_info(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = lookup_session(&state, &headers).await?;
    let mut session = session.lock().await;
    session.touch();
    Ok(Json(SessionResponse {
        messages: session.memory().turns().to_vec(),
        voice_usage: session.voice_usage(),
        voice_limit: state.pipeline.voice_limit(),
    }))
}

async fn reset_session(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let session = lookup_session(&state, &headers).await?;
    let mut session = session.lock().await;
    session.touch();
    session.reset();
    with_logger(&state.logger, |l| {
        l.debug(&format!("session {}: reset", session.id()));
    });
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum VoiceResponse {
    Completed {
        transcript: String,
        language: Option<String>,
        emotion: String,
        reply: String,
        audio_html: String,
        messages: Vec<ChatTurn>,
        voice_usage: u32,
    },
    LimitReached {
        warning: String,
        voice_usage: u32,
    },
}

/// Runs one voice turn for the recording in the request body.
async fn voice(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<VoiceResponse>, ApiError> {
    let session = lookup_session(&state, &headers).await?;
    if body.is_empty() {
        return Err(ApiError::BadRequest("Empty audio data"));
    }

    // held for the whole turn, so a session runs one turn at a time
    let mut session = session.lock().await;
    let outcome = state.pipeline.run_turn(&mut session, &body).await?;

    let response = match outcome {
        TurnOutcome::Completed(turn) => VoiceResponse::Completed {
            transcript: turn.transcript,
            language: turn.language,
            emotion: turn.emotion,
            reply: turn.reply,
            audio_html: turn.audio_html,
            messages: session.memory().turns().to_vec(),
            voice_usage: session.voice_usage(),
        },
        TurnOutcome::LimitReached { warning } => VoiceResponse::LimitReached {
            warning,
            voice_usage: session.voice_usage(),
        },
    };
    Ok(Json(response))
}

async fn lookup_session(state: &AppState, headers: &HeaderMap) -> Result<SharedSession, ApiError> {
    let id = headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v.trim()).ok())
        .ok_or(ApiError::BadRequest("Missing or malformed session id"))?;
    state.sessions.get(id).await.ok_or(ApiError::UnknownSession)
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(&'static str),
    UnknownSession,
    Pipeline(PipelineError),
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        Self::Pipeline(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: ErrorBody,
        }

        #[derive(Serialize)]
        struct ErrorBody {
            code: &'static str,
            message: String,
        }

        let (status, code, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.to_owned()),
            Self::UnknownSession => (
                StatusCode::NOT_FOUND,
                "unknown_session",
                "This session has ended, reload the page to start a new one".to_owned(),
            ),
            Self::Pipeline(err) => (StatusCode::BAD_GATEWAY, err.stage(), err.to_string()),
        };

        (status, Json(ErrorResponse { error: ErrorBody { code, message } })).into_response()
    }
}
