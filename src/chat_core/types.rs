use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Human,
    Assistant,
}

impl Role {
    pub fn class(&self) -> &'static str {
        match self {
            Role::Human => "t2m__chat-human-message",
            Role::Assistant => "t2m__chat-ai-message",
        }
    }
}

/// One block in the transcript.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: String) -> Message {
        Message { role, content }
    }

    pub fn human(content: impl Into<String>) -> Message {
        Message::new(Role::Human, content.into())
    }

    pub fn assistant(content: impl Into<String>) -> Message {
        Message::new(Role::Assistant, content.into())
    }
}

/// A prompt and the response it got, as kept in a participant's thread.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub prompt: String,
    pub response: String,
}

impl Exchange {
    pub fn new(prompt: impl Into<String>, response: impl Into<String>) -> Exchange {
        Exchange {
            prompt: prompt.into(),
            response: response.into(),
        }
    }

    pub fn messages(&self) -> [Message; 2] {
        [
            Message::human(self.prompt.clone()),
            Message::assistant(self.response.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_from_thread_json() {
        let thread: Vec<Exchange> =
            serde_json::from_str(r#"[{"prompt": "hi", "response": "hello"}]"#).unwrap();
        assert_eq!(thread, vec![Exchange::new("hi", "hello")]);
    }

    #[test]
    fn test_exchange_messages_order() {
        let [first, second] = Exchange::new("bye", "goodbye").messages();
        assert_eq!(first, Message::human("bye"));
        assert_eq!(second, Message::assistant("goodbye"));
    }
}
