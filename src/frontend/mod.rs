mod app;
mod components;
mod page;
mod server_liveview;
mod types;
mod view;

pub use app::chat_page;
pub use page::host_page;
pub use server_liveview::start_server;
pub use types::ChatPage;
pub use view::{ChannelTransport, LiveView};
