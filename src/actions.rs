//! The language steps of a turn: classify the customer's tone, build the
//! sales prompt and write the reply.

pub mod classification;
mod model;
pub mod prompt;
pub mod reply;

pub use classification::EmotionClassifier;
pub use model::Emotion;
pub use prompt::build_system_prompt;
pub use reply::ReplyGenerator;
