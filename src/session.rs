//! Per-session state: the conversation memory and the voice usage counter of
//! one browser page, and the store that keeps them apart.

mod model;
mod store;

pub use model::{Author, ChatTurn, ConversationMemory, HistoryWindow, SessionContext};
pub use store::{SessionStore, SharedSession};
