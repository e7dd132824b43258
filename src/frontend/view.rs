use anyhow::{anyhow, Result};
use dioxus::prelude::*;
use tokio::sync::mpsc::UnboundedSender;

use crate::chat_core::{Message, Transport, View};

/// The transcript and input of a live page, held in Dioxus hooks.
#[derive(Clone)]
pub struct LiveView {
    messages: UseRef<Vec<Message>>,
    draft: UseRef<String>,
    scroll_epoch: UseRef<u64>,
}

impl LiveView {
    pub fn new(
        messages: UseRef<Vec<Message>>,
        draft: UseRef<String>,
        scroll_epoch: UseRef<u64>,
    ) -> LiveView {
        LiveView {
            messages,
            draft,
            scroll_epoch,
        }
    }
}

impl View for LiveView {
    fn input_value(&self) -> String {
        self.draft.read().clone()
    }

    fn clear_input(&mut self) {
        self.draft.set(String::new());
    }

    fn append(&mut self, message: &Message) {
        self.messages.write().push(message.clone());
    }

    // The page script follows `data-scroll-epoch` on the chat box.
    fn scroll_to_bottom(&mut self) {
        *self.scroll_epoch.write() += 1;
    }
}

/// Outbound side of the page: forwards every submission to the host session.
pub struct ChannelTransport {
    outbound: UnboundedSender<String>,
}

impl ChannelTransport {
    pub fn new(outbound: UnboundedSender<String>) -> ChannelTransport {
        ChannelTransport { outbound }
    }
}

impl Transport for ChannelTransport {
    fn send(&mut self, text: &str) -> Result<()> {
        self.outbound
            .send(text.to_string())
            .map_err(|_| anyhow!("Host session has gone away"))
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;

    #[test]
    fn test_channel_transport_forwards() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut transport = ChannelTransport::new(tx);

        transport.send("first").unwrap();
        transport.send("first").unwrap();

        assert_eq!(rx.try_recv().unwrap(), "first");
        assert_eq!(rx.try_recv().unwrap(), "first");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_channel_transport_closed() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut transport = ChannelTransport::new(tx);
        drop(rx);

        assert!(transport.send("anyone?").is_err());
    }
}
