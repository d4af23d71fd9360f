//! One voice turn, start to finish: transcribe, classify, prompt, generate,
//! synthesize, then persist the exchange into the session.

use thiserror::Error;

use crate::actions::{EmotionClassifier, ReplyGenerator, build_system_prompt};
use crate::ai_providers::{AIModel, ChatModel};
use crate::config::Config;
use crate::logger::{SharedLogger, with_logger};
use crate::session::{HistoryWindow, SessionContext};
use crate::speech::{SpeechListener, SpeechSynthesizer, SynthesizedSpeech, playback};

/// A stage of the turn failed. The session is left as it was before the turn.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("transcription failed: {0}")]
    Transcription(String),

    #[error("emotion classification failed: {0}")]
    Classification(String),

    #[error("reply generation failed: {0}")]
    Generation(String),

    #[error("speech synthesis failed: {0}")]
    Synthesis(String),
}

impl PipelineError {
    #[must_use]
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Transcription(_) => "transcription",
            Self::Classification(_) => "classification",
            Self::Generation(_) => "generation",
            Self::Synthesis(_) => "synthesis",
        }
    }
}

/// What the page gets to show after a completed turn.
#[derive(Clone, Debug)]
pub struct CompletedTurn {
    pub transcript: String,
    pub language: Option<String>,
    /// Raw classifier label, not necessarily one of the known five.
    pub emotion: String,
    pub reply: String,
    pub audio: SynthesizedSpeech,
    pub audio_html: String,
}

#[derive(Clone, Debug)]
pub enum TurnOutcome {
    Completed(CompletedTurn),
    /// The session used up its voice submissions, nothing was sent anywhere.
    LimitReached { warning: String },
}

pub struct VoicePipeline<M: AIModel> {
    listener: SpeechListener,
    classifier: EmotionClassifier<M>,
    generator: ReplyGenerator<M>,
    synthesizer: SpeechSynthesizer,
    voice_limit: u32,
    logger: SharedLogger,
}

impl VoicePipeline<ChatModel> {
    pub fn from_config(config: &Config, logger: SharedLogger) -> anyhow::Result<Self> {
        let window = HistoryWindow {
            max_turns: config.history_turns,
        };
        Ok(Self::new(
            SpeechListener::new(config)?,
            EmotionClassifier::new(ChatModel::new(config)?),
            ReplyGenerator::new(ChatModel::new(config)?, window),
            SpeechSynthesizer::new(config)?,
            config.voice_limit,
            logger,
        ))
    }
}

impl<M: AIModel + Sync> VoicePipeline<M> {
    pub fn new(
        listener: SpeechListener,
        classifier: EmotionClassifier<M>,
        generator: ReplyGenerator<M>,
        synthesizer: SpeechSynthesizer,
        voice_limit: u32,
        logger: SharedLogger,
    ) -> Self {
        Self {
            listener,
            classifier,
            generator,
            synthesizer,
            voice_limit,
            logger,
        }
    }

    #[must_use]
    pub fn voice_limit(&self) -> u32 {
        self.voice_limit
    }

    #[must_use]
    pub fn limit_warning(&self) -> String {
        format!(
            "You've used all {} voice messages for this session. Thanks for \
            chatting with Mia!",
            self.voice_limit
        )
    }

    pub async fn run_turn(
        &self,
        session: &mut SessionContext,
        audio: &[u8],
    ) -> Result<TurnOutcome, PipelineError> {
        session.touch();
        let session_id = session.id();

        if !session.try_accept_voice(self.voice_limit) {
            with_logger(&self.logger, |l| {
                l.info(&format!(
                    "session {session_id}: voice limit of {} reached, rejecting input",
                    self.voice_limit
                ));
            });
            return Ok(TurnOutcome::LimitReached {
                warning: self.limit_warning(),
            });
        }

        let result = self.run_stages(session, audio).await;
        match &result {
            Ok(turn) => with_logger(&self.logger, |l| {
                l.info(&format!(
                    "session {session_id}: turn {} done ({} emotion)",
                    session.memory().completed_turns(),
                    turn.emotion
                ));
            }),
            Err(err) => with_logger(&self.logger, |l| {
                l.error(&format!("session {session_id}: {err}"));
            }),
        }
        result.map(TurnOutcome::Completed)
    }

    async fn run_stages(
        &self,
        session: &mut SessionContext,
        audio: &[u8],
    ) -> Result<CompletedTurn, PipelineError> {
        self.debug(&format!("transcribing {} bytes of audio", audio.len()));
        let speech = self
            .listener
            .transcribe(audio)
            .await
            .map_err(|e| PipelineError::Transcription(format!("{e:#}")))?;
        if speech.text.is_empty() {
            return Err(PipelineError::Transcription(
                "no speech was recognised in the recording".to_owned(),
            ));
        }
        self.debug(&format!("user said: {:?}", speech.text));

        let emotion = self
            .classifier
            .classify_emotion(&speech.text)
            .await
            .map_err(|e| PipelineError::Classification(format!("{e:#}")))?;
        self.debug(&format!("emotion: {emotion}"));

        let system_prompt = build_system_prompt(speech.language.as_deref(), &emotion);

        let reply = self
            .generator
            .generate_reply(&system_prompt, session.memory().turns(), &speech.text)
            .await
            .map_err(|e| PipelineError::Generation(format!("{e:#}")))?;
        self.debug(&format!("assistant: {reply:?}"));

        let spoken = self
            .synthesizer
            .synthesize(&reply)
            .await
            .map_err(|e| PipelineError::Synthesis(format!("{e:#}")))?;
        let audio_html = playback::autoplay_html(&spoken);

        session.append_turn(speech.text.clone(), reply.clone());

        Ok(CompletedTurn {
            transcript: speech.text,
            language: speech.language,
            emotion,
            reply,
            audio: spoken,
            audio_html,
        })
    }

    fn debug(&self, msg: &str) {
        with_logger(&self.logger, |l| l.debug(msg));
    }
}
