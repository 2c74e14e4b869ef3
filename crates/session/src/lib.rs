pub mod config;
pub mod event_log;
pub mod session;
pub mod status;

pub use config::*;
pub use event_log::*;
pub use session::*;
pub use status::*;
