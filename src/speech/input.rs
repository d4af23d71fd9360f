//! A [`SpeechListener`] transcribes a recorded clip to written text.
//! This module contains a [`SpeechListener`] struct which abstracts over the
//! different possible implementations.

mod openai;

use crate::config::Config;

use openai::SpeechListener as OpenAISpeechListener;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecognizedSpeech {
    pub text: String,
    /// Language the provider detected, e.g. "english".
    pub language: Option<String>,
}

pub struct SpeechListener(SpeechListenerImpl);

impl SpeechListener {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        // If more speech listener backends are to be implemented, use the
        // config to decide which one to use at runtime.
        Ok(Self(SpeechListenerImpl::OpenAI(OpenAISpeechListener::new(
            config,
        )?)))
    }

    pub async fn transcribe(&self, audio: &[u8]) -> anyhow::Result<RecognizedSpeech> {
        self.0.transcribe(audio).await
    }
}

enum SpeechListenerImpl {
    OpenAI(OpenAISpeechListener),
}

impl SpeechListenerImpl {
    async fn transcribe(&self, audio: &[u8]) -> anyhow::Result<RecognizedSpeech> {
        match self {
            SpeechListenerImpl::OpenAI(l) => l.transcribe(audio).await,
        }
    }
}
