//! Built-in tool implementations.

mod conversation;

pub use conversation::{ConversationTool, DEFAULT_CONVERSATION_PROMPT};
