mod action;
mod event;
mod message;
mod report;
mod role;
mod session;
mod slash_command;

pub use action::*;
pub use event::*;
pub use message::*;
pub use report::*;
pub use role::*;
pub use session::*;
pub use slash_command::*;
