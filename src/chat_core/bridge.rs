use anyhow::Result;
use tracing::debug;

use super::types::{Exchange, Message};

/// The page surface the bridge writes to: a transcript container and the
/// text input next to it.
pub trait View {
    fn input_value(&self) -> String;
    fn clear_input(&mut self);
    fn append(&mut self, message: &Message);
    fn scroll_to_bottom(&mut self);
}

/// Outbound call towards whoever answers the human.
pub trait Transport {
    fn send(&mut self, text: &str) -> Result<()>;
}

pub struct ChatBridge<V, T> {
    view: V,
    transport: T,
}

impl<V: View, T: Transport> ChatBridge<V, T> {
    pub fn new(view: V, transport: T) -> ChatBridge<V, T> {
        ChatBridge { view, transport }
    }

    /// Takes whatever is in the input and sends it.
    ///
    /// Blank input is left alone and `Ok(false)` is returned. A transport
    /// error is returned after the message has already been displayed.
    pub fn submit(&mut self) -> Result<bool> {
        let draft = self.view.input_value();
        let text = draft.trim();
        if text.is_empty() {
            return Ok(false);
        }

        self.display(Message::human(text));
        self.view.clear_input();

        debug!(len = text.len(), "sending human message");
        self.transport.send(text)?;
        Ok(true)
    }

    pub fn receive(&mut self, text: &str) {
        self.display(Message::assistant(text));
    }

    pub fn render_history(&mut self, thread: &[Exchange]) {
        for exchange in thread {
            for message in exchange.messages() {
                self.display(message);
            }
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    fn display(&mut self, message: Message) {
        self.view.append(&message);
        self.view.scroll_to_bottom();
    }
}
