use crate::ai_providers::{AIModel, ModelInput};
use crate::session::ChatTurn;

use super::Emotion;

pub struct EmotionClassifier<M: AIModel> {
    model: M,
}

impl<M: AIModel + Sync> EmotionClassifier<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Asks the model for a one word tone label of `transcript`.
    ///
    /// The answer comes back lower-cased and trimmed but is otherwise taken as
    /// is, it is not checked against the five known labels.
    pub async fn classify_emotion(&self, transcript: &str) -> anyhow::Result<String> {
        let labels = Emotion::variants()
            .into_iter()
            .map(Emotion::label)
            .collect::<Vec<_>>()
            .join(", ");

        let instructions = format!(
            "You classify the emotional tone of a customer talking to a \
            hair-care shop assistant. \
            Answer with exactly one word out of: {labels}.\n\
            Return only that word, without punctuation.\n\
            \n\
            Example:\n\
            Customer: I can't believe my hair broke off again, nothing works!\n\
            Your response: frustrated\n\
            "
        );

        let model_input = ModelInput {
            instructions,
            log: vec![ChatTurn::user(transcript)],
            temperature: Some(0.0),
        };

        let output = self.model.send(model_input).await?;
        let response = output.assistant_text()?;

        Ok(response.trim().to_lowercase())
    }
}
