use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::host::{Assignment, Demographic, ResponderKind};

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub reachable_addr: String,
    pub database_url: String,
    pub page_title: String,
    pub responder: ResponderKind,
    pub model: String,
    pub max_tokens: u16,
    pub experiment_context: String,
    pub treatments: Vec<String>,
    pub assignment: Assignment,
    pub demographics: Vec<Demographic>,
}

impl Config {
    /// Reads the process environment. Loading `.env` is up to the binary.
    pub fn from_env() -> Result<Config> {
        Config::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Config> {
        let listen_addr: SocketAddr = var("LISTEN_ADDR")
            .unwrap_or_else(|| "127.0.0.1:3030".to_string())
            .parse()
            .context("LISTEN_ADDR is not a socket address")?;
        let reachable_addr = var("REACHABLE_ADDR").unwrap_or_else(|| listen_addr.to_string());

        let responder = match var("RESPONDER").as_deref().unwrap_or("echo") {
            "echo" => ResponderKind::Echo,
            "openai" => ResponderKind::OpenAi,
            other => bail!("Unknown RESPONDER: {other}"),
        };

        let max_tokens = match var("MAX_TOKENS") {
            Some(raw) => raw.parse().context("MAX_TOKENS must be a u16")?,
            None => 512,
        };

        let treatments: Vec<String> = var("TREATMENTS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|label| !label.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();
        let assignment = match var("ASSIGNMENT").as_deref().unwrap_or("complete") {
            "complete" => Assignment::Complete,
            "random" => Assignment::Random,
            other => bail!("Unknown ASSIGNMENT: {other}"),
        };

        let demographics = match var("DEMOGRAPHICS_PATH") {
            Some(path) => load_demographics(PathBuf::from(path))?,
            None => Vec::new(),
        };

        Ok(Config {
            listen_addr,
            reachable_addr,
            database_url: var("DATABASE_URL").unwrap_or_else(|| "livechat.db".to_string()),
            page_title: var("PAGE_TITLE").unwrap_or_else(|| "Chat".to_string()),
            responder,
            model: var("OPENAI_MODEL").unwrap_or_else(|| "gpt-3.5-turbo".to_string()),
            max_tokens,
            experiment_context: var("EXPERIMENT_CONTEXT").unwrap_or_default(),
            treatments,
            assignment,
            demographics,
        })
    }
}

fn load_demographics(path: PathBuf) -> Result<Vec<Demographic>> {
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Malformed demographics in {}", path.display()))
}
