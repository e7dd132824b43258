use anyhow::{anyhow, Result};
use async_openai::{
    config::OpenAIConfig,
    types::{self as openai_types, ChatCompletionRequestMessageArgs, CreateChatCompletionRequestArgs},
    Client,
};
use tracing::debug;

use super::prompt::{conversational_system_message, demographic_prompt};
use crate::chat_core::Exchange;
use crate::config::Config;

type Request = openai_types::CreateChatCompletionRequest;
type Message = openai_types::ChatCompletionRequestMessage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponderKind {
    Echo,
    OpenAi,
}

/// Produces the assistant side of the conversation.
pub enum Responder {
    /// Repeats the prompt back. Useful without network access.
    Echo,
    OpenAi(OpenAiResponder),
}

impl Responder {
    pub fn from_config(config: &Config) -> Responder {
        match config.responder {
            ResponderKind::Echo => Responder::Echo,
            ResponderKind::OpenAi => Responder::OpenAi(OpenAiResponder::new(config)),
        }
    }

    /// Answers `prompt` for a participant in `treatment`, given their thread so far.
    pub async fn respond(&self, treatment: &str, thread: &[Exchange], prompt: &str) -> Result<String> {
        match self {
            Responder::Echo => Ok(prompt.to_string()),
            Responder::OpenAi(bot) => bot.respond(treatment, thread, prompt).await,
        }
    }
}

pub struct OpenAiResponder {
    client: Client<OpenAIConfig>,
    model: String,
    max_tokens: u16,
    context: String,
    demographics: String,
}

impl OpenAiResponder {
    pub fn new(config: &Config) -> OpenAiResponder {
        OpenAiResponder {
            client: Client::new(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            context: config.experiment_context.clone(),
            demographics: demographic_prompt(&config.demographics),
        }
    }

    async fn respond(&self, treatment: &str, thread: &[Exchange], prompt: &str) -> Result<String> {
        let request = self.build_request(treatment, thread, prompt)?;
        debug!(model = %self.model, turns = thread.len(), "requesting completion");
        let response = self
            .client
            .chat()
            .create(request)
            .await?
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Completion returned no choices"))?
            .message;
        response
            .content
            .ok_or_else(|| anyhow!("Completion returned no content"))
    }

    fn build_request(&self, treatment: &str, thread: &[Exchange], prompt: &str) -> Result<Request> {
        let system = conversational_system_message(&self.context, &self.demographics, treatment);
        let mut messages = vec![message(openai_types::Role::System, &system)?];
        for exchange in thread {
            messages.push(message(openai_types::Role::User, &exchange.prompt)?);
            messages.push(message(openai_types::Role::Assistant, &exchange.response)?);
        }
        messages.push(message(openai_types::Role::User, prompt)?);

        let request = CreateChatCompletionRequestArgs::default()
            .max_tokens(self.max_tokens)
            .model(&self.model)
            .messages(messages)
            .build()?;
        Ok(request)
    }
}

fn message(role: openai_types::Role, content: &str) -> Result<Message> {
    Ok(ChatCompletionRequestMessageArgs::default()
        .role(role)
        .content(content)
        .build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::from_vars(|key| match key {
            "RESPONDER" => Some("openai".to_string()),
            "OPENAI_MODEL" => Some("gpt-test".to_string()),
            "EXPERIMENT_CONTEXT" => Some("You are taking part in a study.".to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_echo() {
        let reply = Responder::Echo
            .respond("control", &[Exchange::new("a", "a")], "b")
            .await
            .unwrap();
        assert_eq!(reply, "b");
    }

    #[test]
    fn test_request_replays_thread() {
        let bot = OpenAiResponder::new(&config());
        let thread = vec![Exchange::new("hi", "hello"), Exchange::new("bye", "goodbye")];

        let request = bot.build_request("control", &thread, "again").unwrap();

        assert_eq!(request.model, "gpt-test");
        assert_eq!(request.messages.len(), 6);
        assert!(matches!(request.messages[0].role, openai_types::Role::System));
        assert!(matches!(request.messages[1].role, openai_types::Role::User));
        assert!(matches!(request.messages[2].role, openai_types::Role::Assistant));
        assert!(matches!(request.messages[5].role, openai_types::Role::User));
    }

    #[test]
    fn test_system_message_carries_treatment() {
        let bot = OpenAiResponder::new(&config());

        let nudged = bot.build_request("Mention the deadline.", &[], "hi").unwrap();
        let control = bot.build_request("", &[], "hi").unwrap();

        let system = |request: &Request| {
            let first = serde_json::to_value(&request.messages[0]).unwrap();
            first["content"].as_str().unwrap_or_default().to_string()
        };
        assert!(system(&nudged).starts_with("You are taking part in a study."));
        assert!(system(&nudged).ends_with("Mention the deadline."));
        assert!(!system(&control).contains("deadline"));
    }
}
