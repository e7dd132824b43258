pub mod chat_core;
pub mod config;
pub mod frontend;
pub mod host;

pub use config::Config;
pub use frontend::start_server;
