#![allow(non_snake_case)]

use dioxus::html::input_data::keyboard_types::Key;
use dioxus::prelude::*;

use crate::chat_core::Role;

#[derive(PartialEq, Props)]
pub struct MessageProps {
    role: Role,
    content: String,
}

pub fn MessageBlock(cx: Scope<MessageProps>) -> Element {
    let class = cx.props.role.class();
    let mut lines = cx
        .props
        .content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line));
    let first = lines.next().unwrap_or_default();
    cx.render(rsx!(
        div {
            class: "t2m__chat-message {class}",
            div {
                "{first}"
                for line in (lines) {
                    br {}
                    "{line}"
                }
            }
        }
    ))
}

#[derive(Props)]
pub struct InputProps<'a> {
    draft: &'a UseRef<String>,
    on_send: EventHandler<'a>,
}

pub fn ChatInput<'a>(cx: Scope<'a, InputProps<'a>>) -> Element<'a> {
    let draft = cx.props.draft;
    cx.render(rsx!(
        div {
            id: "t2m__chat-input-area",
            input {
                id: "t2m__chat-human-input",
                r#type: "text",
                placeholder: "Type your message here",
                value: "{draft.read()}",
                oninput: move |e| draft.set(e.value.clone()),
                onkeydown: move |e: Event<KeyboardData>| {
                    if let Key::Enter = e.data.key() {
                        cx.props.on_send.call(());
                    }
                },
            }
            button {
                id: "t2m__chat-btn-send",
                onclick: move |_| cx.props.on_send.call(()),
                "Send"
            }
        }
    ))
}

#[cfg(test)]
mod tests {
    use dioxus::core::Mutation;

    use super::*;

    const CONTENT: &str = "<b>bold</b> & co\r\nsecond line\n";

    fn block(cx: Scope) -> Element {
        cx.render(rsx!(MessageBlock {
            role: Role::Assistant,
            content: CONTENT.to_string(),
        }))
    }

    #[test]
    fn test_content_becomes_text_nodes() {
        let mut dom = VirtualDom::new(block);
        let mutations = dom.rebuild();
        let texts: Vec<&str> = mutations
            .edits
            .iter()
            .filter_map(|edit| match edit {
                Mutation::CreateTextNode { value, .. } | Mutation::HydrateText { value, .. } => {
                    Some(*value)
                }
                _ => None,
            })
            .collect();

        assert!(texts.contains(&"<b>bold</b> & co"));
        assert!(texts.contains(&"second line"));
    }

    #[test]
    fn test_trailing_line_break_is_kept() {
        let mut dom = VirtualDom::new(block);
        let _ = dom.rebuild();
        let html = dioxus_ssr::render(&dom);

        assert_eq!(html.matches("<br").count(), 2);
        assert!(html.contains("t2m__chat-message t2m__chat-ai-message"));
    }
}
