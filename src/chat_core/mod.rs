mod bridge;
mod types;

pub use bridge::{ChatBridge, Transport, View};
pub use types::{Exchange, Message, Role};
