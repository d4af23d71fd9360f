//! Using the [Open AI transcription API](https://platform.openai.com/docs/guides/speech-to-text)

use anyhow::Context;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::ai_providers::{error_for_status, http_client};
use crate::config::Config;
use crate::speech::audio_format::AudioContainer;

use super::RecognizedSpeech;

pub struct SpeechListener {
    api_key: String,
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl SpeechListener {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            api_key: config.openai_key.clone(),
            base_url: config.openai_base_url.clone(),
            model: config.transcription_model.clone(),
            client: http_client(config.request_timeout)?,
        })
    }

    pub async fn transcribe(&self, audio: &[u8]) -> anyhow::Result<RecognizedSpeech> {
        let container = AudioContainer::sniff(audio).ok_or(anyhow::anyhow!(
            "The recording is not in an audio format that can be transcribed"
        ))?;

        let file = Part::bytes(audio.to_vec())
            .file_name(container.file_name())
            .mime_str(container.mime_type())
            .context(format!("Could not attach {container} audio to the request"))?;
        let form = Form::new()
            .part("file", file)
            .text("model", self.model.clone())
            .text("response_format", "verbose_json");

        let resp = self
            .client
            .post(format!("{}/audio/transcriptions", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .context("Failed to reach OpenAI transcription API")?;
        let transcription: TranscriptionResponse =
            error_for_status(resp, "OpenAI transcription request")
                .await?
                .json()
                .await
                .context("Failed to parse transcription response")?;

        Ok(transcription.into())
    }
}

/* Transcription messages */

#[derive(Debug, Deserialize)]
pub struct TranscriptionResponse {
    pub text: String,
    // only present with response_format=verbose_json
    #[serde(default)]
    pub language: Option<String>,
}

impl From<TranscriptionResponse> for RecognizedSpeech {
    fn from(resp: TranscriptionResponse) -> Self {
        Self {
            text: resp.text.trim().to_owned(),
            language: resp.language.filter(|l| !l.is_empty()),
        }
    }
}
