pub mod actions;
mod app_state;
pub mod captures;
mod chat_lines;
mod conversation;
pub mod events;
mod scroll;

pub use app_state::*;
pub use chat_lines::*;
pub use conversation::*;
pub use scroll::*;
