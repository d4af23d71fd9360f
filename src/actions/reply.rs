use crate::ai_providers::{AIModel, ModelInput};
use crate::session::{ChatTurn, HistoryWindow};

pub const REPLY_TEMPERATURE: f32 = 0.4;

/// Writes the assistant's next line of the sales conversation.
pub struct ReplyGenerator<M: AIModel> {
    model: M,
    window: HistoryWindow,
}

impl<M: AIModel + Sync> ReplyGenerator<M> {
    pub fn new(model: M, window: HistoryWindow) -> Self {
        Self { model, window }
    }

    pub async fn generate_reply(
        &self,
        system_prompt: &str,
        history: &[ChatTurn],
        user_text: &str,
    ) -> anyhow::Result<String> {
        let mut log = self.window.apply(history).to_vec();
        log.push(ChatTurn::user(user_text));

        let model_input = ModelInput {
            instructions: system_prompt.to_owned(),
            log,
            temperature: Some(REPLY_TEMPERATURE),
        };

        let output = self.model.send(model_input).await?;
        let reply = output.assistant_text()?.trim();
        if reply.is_empty() {
            anyhow::bail!("The model answered with an empty reply");
        }
        Ok(reply.to_owned())
    }
}
