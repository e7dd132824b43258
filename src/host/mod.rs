mod prompt;
mod responder;
mod schema;
mod session;
mod store;
mod treatment;

pub use prompt::{conversational_system_message, demographic_prompt, Demographic};
pub use responder::{OpenAiResponder, Responder, ResponderKind};
pub use session::{Host, Session};
pub use store::Store;
pub use treatment::{Assignment, Treatments};
