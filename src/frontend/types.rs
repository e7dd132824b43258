use std::sync::Mutex;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crate::chat_core::Exchange;

/// Root props of the chat page: everything the host hands over when the
/// page connects.
pub struct ChatPage {
    pub(crate) history: Vec<Exchange>,
    pub(crate) outbound: UnboundedSender<String>,
    inbound: Mutex<Option<UnboundedReceiver<String>>>,
}

impl ChatPage {
    pub fn new(
        history: Vec<Exchange>,
        outbound: UnboundedSender<String>,
        inbound: UnboundedReceiver<String>,
    ) -> ChatPage {
        ChatPage {
            history,
            outbound,
            inbound: Mutex::new(Some(inbound)),
        }
    }

    /// Hands out the inbound receiver once; later calls get `None`.
    pub(crate) fn take_inbound(&self) -> Option<UnboundedReceiver<String>> {
        self.inbound.lock().ok().and_then(|mut inbound| inbound.take())
    }
}
