use dioxus::prelude::*;
use tracing::{debug, warn};

use super::components::*;
use super::types::ChatPage;
use super::view::{ChannelTransport, LiveView};
use crate::chat_core::{ChatBridge, Message};

pub fn chat_page(cx: Scope<ChatPage>) -> Element {
    let messages = use_ref(cx, Vec::<Message>::new);
    let draft = use_ref(cx, String::new);
    let scroll_epoch = use_ref(cx, || 0u64);

    let bridge = use_ref(cx, || {
        let view = LiveView::new(messages.clone(), draft.clone(), scroll_epoch.clone());
        let transport = ChannelTransport::new(cx.props.outbound.clone());
        let mut bridge = ChatBridge::new(view, transport);
        bridge.render_history(&cx.props.history);
        bridge
    });

    let inbound = cx.props.take_inbound();
    use_future(cx, (), move |_| {
        to_owned![bridge];
        async move {
            let Some(mut inbound) = inbound else {
                return;
            };
            while let Some(text) = inbound.recv().await {
                bridge.write().receive(&text);
            }
            debug!("inbound channel closed");
        }
    });

    let send = move || match bridge.write().submit() {
        Ok(true) => debug!("message submitted"),
        Ok(false) => {}
        Err(err) => warn!("message not delivered: {err:#}"),
    };

    cx.render(rsx!(
        style { include_str!("./style.css") }
        div {
            id: "t2m__chat-box",
            class: "t2m__chat-box",
            "data-scroll-epoch": "{scroll_epoch.read()}",
            for message in messages.read().iter() {
                MessageBlock {
                    role: message.role,
                    content: message.content.clone(),
                }
            }
        }
        ChatInput {
            draft: draft,
            on_send: move |_| send(),
        }
    ))
}
