//! Using the [Open AI speech API](https://platform.openai.com/docs/guides/text-to-speech)

use anyhow::Context;
use serde::Serialize;

use crate::ai_providers::{error_for_status, http_client};
use crate::config::Config;

use super::SynthesizedSpeech;

pub struct SpeechSynthesizer {
    api_key: String,
    base_url: String,
    model: String,
    voice: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'static str,
}

impl SpeechSynthesizer {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            api_key: config.openai_key.clone(),
            base_url: config.openai_base_url.clone(),
            model: config.tts_model.clone(),
            voice: config.tts_voice.clone(),
            client: http_client(config.request_timeout)?,
        })
    }

    pub async fn synthesize(&self, text: &str) -> anyhow::Result<SynthesizedSpeech> {
        let request = SpeechRequest {
            model: &self.model,
            input: text,
            voice: &self.voice,
            response_format: "mp3",
        };

        let resp = self
            .client
            .post(format!("{}/audio/speech", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to reach OpenAI speech API")?;
        let audio = error_for_status(resp, "OpenAI speech request")
            .await?
            .bytes()
            .await
            .context("Failed to read synthesized audio")?;

        if audio.is_empty() {
            anyhow::bail!("OpenAI speech API returned no audio");
        }

        Ok(SynthesizedSpeech {
            audio: audio.to_vec(),
        })
    }
}
