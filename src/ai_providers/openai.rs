use anyhow::Context;
use reqwest::Client as ReqwestClient;

use crate::config::Config;
use crate::session::{Author, ChatTurn};

use super::{AIModel, ModelInput, ModelOutput, error_for_status, http_client};

use responses_api::model_response::request::{
    Body as ResponseApiRequestBody, InputItem, Message,
};
use responses_api::model_response::response::{
    Body as ResponsesApiResponseBody, MessageOutputContent, Output,
};

/// A chat model behind the OpenAI responses API.
pub struct ChatModel {
    api_key: String,
    base_url: String,
    model: String,
    client: ReqwestClient,
}

impl ChatModel {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            api_key: config.openai_key.clone(),
            base_url: config.openai_base_url.clone(),
            model: config.chat_model.clone(),
            client: http_client(config.request_timeout)?,
        })
    }
}

impl AIModel for ChatModel {
    async fn send(&self, input: ModelInput) -> anyhow::Result<ModelOutput> {
        let api_input = request_body(&self.model, input);
        let resp = self
            .client
            .post(format!("{}/responses", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&api_input)
            .send()
            .await
            .context("Failed to reach OpenAI API")?;
        let resp: ResponsesApiResponseBody = error_for_status(resp, "OpenAI responses request")
            .await?
            .json()
            .await
            .context("Failed to parse OpenAI response body")?;

        output_items(resp)
    }
}

fn request_body(model: &str, input: ModelInput) -> ResponseApiRequestBody {
    let items = input.log.iter().map(InputItem::from).collect();
    ResponseApiRequestBody {
        input: items,
        instructions: Some(input.instructions),
        model: model.to_owned(),
        stream: false,
        temperature: input.temperature,
    }
}

fn output_items(resp: ResponsesApiResponseBody) -> anyhow::Result<ModelOutput> {
    let mut items = Vec::new();
    for output in resp.output {
        let Output::Message(msg) = output else {
            continue;
        };
        let mut parts = Vec::with_capacity(msg.content.len());
        for content in msg.content {
            match content {
                MessageOutputContent::OutputText(txt) => parts.push(txt.text),
                MessageOutputContent::Refusal(no) => {
                    anyhow::bail!("The model refused to answer: {}", no.refusal)
                }
            }
        }
        items.push(ChatTurn::assistant(parts.join("\n\n")));
    }
    Ok(ModelOutput { items })
}

impl From<&ChatTurn> for InputItem {
    fn from(turn: &ChatTurn) -> Self {
        let message = match turn.role() {
            Author::User => Message::User {
                content: turn.content().to_owned(),
            },
            Author::Assistant => Message::Assistant {
                content: turn.content().to_owned(),
            },
        };
        InputItem::Message(message)
    }
}

mod responses_api {
    pub mod model_response {
        pub mod request {
            use serde::Serialize;

            #[derive(Debug, Serialize)]
            #[serde(rename_all = "snake_case")]
            pub struct Body {
                pub input: Vec<InputItem>,

                #[serde(skip_serializing_if = "Option::is_none")]
                pub instructions: Option<String>,

                pub model: String,

                pub stream: bool,

                #[serde(skip_serializing_if = "Option::is_none")]
                pub temperature: Option<f32>, // 0.0 to 2.0
            }

            #[derive(Debug, Serialize)]
            #[serde(tag = "type")]
            pub enum InputItem {
                #[serde(rename = "message")]
                Message(Message),
            }

            // The "easy" message form: plain string content, no item ids.
            // Leaving out "system", the instructions field covers that.
            #[derive(Debug, Serialize)]
            #[serde(tag = "role")]
            pub enum Message {
                #[serde(rename = "user")]
                User { content: String },
                #[serde(rename = "assistant")]
                Assistant { content: String },
            }
        }

        pub mod response {
            use serde::Deserialize;

            #[derive(Debug, Deserialize)]
            pub struct Body {
                pub output: Vec<Output>,
            }

            #[derive(Debug, Deserialize)]
            #[serde(rename_all = "snake_case", tag = "type")]
            pub enum Output {
                Message(MessageOutput),
                // reasoning items, tool calls, ...
                #[serde(other)]
                Other,
            }

            #[derive(Debug, Deserialize)]
            pub struct MessageOutput {
                pub content: Vec<MessageOutputContent>,
            }

            #[derive(Debug, Deserialize)]
            #[serde(rename_all = "snake_case", tag = "type")]
            pub enum MessageOutputContent {
                OutputText(OutputTextContent),
                Refusal(RefusalContent),
            }

            #[derive(Debug, Deserialize)]
            pub struct OutputTextContent {
                pub text: String,
            }

            #[derive(Debug, Deserialize)]
            pub struct RefusalContent {
                pub refusal: String,
            }
        }
    }
}
