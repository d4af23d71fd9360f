//! Hosted language models. An [`AIModel`] takes instructions plus a chat log
//! and answers with assistant messages.

mod openai;

use std::{future::Future, time::Duration};

use anyhow::Context;

use crate::session::{Author, ChatTurn};

pub use openai::ChatModel;

pub trait AIModel {
    fn send(&self, i: ModelInput) -> impl Future<Output = anyhow::Result<ModelOutput>> + Send;
}

pub struct ModelInput {
    pub instructions: String,
    pub log: Vec<ChatTurn>,
    /// Sampling temperature, `None` leaves it to the provider.
    pub temperature: Option<f32>,
}

pub struct ModelOutput {
    pub items: Vec<ChatTurn>,
}

impl ModelOutput {
    /// The text of the last assistant message.
    pub fn assistant_text(&self) -> anyhow::Result<&str> {
        self.items
            .iter()
            .rev()
            .find(|item| item.role() == Author::Assistant)
            .map(ChatTurn::content)
            .ok_or(anyhow::anyhow!("The model output appears to be empty"))
    }
}

/// HTTP client shared by the provider calls of one component.
pub fn http_client(timeout: Duration) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")
}

/// Turns a non-2xx provider response into an error that carries the body.
pub(crate) async fn error_for_status(
    resp: reqwest::Response,
    what: &str,
) -> anyhow::Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    anyhow::bail!("{what} failed with status {status}: {body}")
}
