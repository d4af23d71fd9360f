//! A [`SpeechSynthesizer`] turns the assistant's reply into spoken audio.
//! Like the listener, it hides which backend does the talking.

mod openai;

use crate::config::Config;

use openai::SpeechSynthesizer as OpenAISpeechSynthesizer;

/// Synthesized speech, mp3 encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SynthesizedSpeech {
    pub audio: Vec<u8>,
}

pub struct SpeechSynthesizer(SpeechSynthesizerImpl);

impl SpeechSynthesizer {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self(SpeechSynthesizerImpl::OpenAI(
            OpenAISpeechSynthesizer::new(config)?,
        )))
    }

    pub async fn synthesize(&self, text: &str) -> anyhow::Result<SynthesizedSpeech> {
        self.0.synthesize(text).await
    }
}

enum SpeechSynthesizerImpl {
    OpenAI(OpenAISpeechSynthesizer),
}

impl SpeechSynthesizerImpl {
    async fn synthesize(&self, text: &str) -> anyhow::Result<SynthesizedSpeech> {
        match self {
            SpeechSynthesizerImpl::OpenAI(s) => s.synthesize(text).await,
        }
    }
}
