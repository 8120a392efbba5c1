//! Terminal client for the PCAP AI Reader.
//!
//! Uploads a packet capture to the analysis service, renders the returned
//! summary, then lets the user ask follow-up questions scoped to that job.
//! The conversation is kept in a single session owned by the controller in
//! `domain::services::Conversation`; the terminal UI and the headless runner
//! only read it.

pub mod application;
pub mod configuration;
pub mod domain;

#[cfg(test)]
pub(crate) mod test_utils;

pub use application::ui::{destruct_terminal_for_panic, start_loop};
pub use configuration::{Config, ConfigKey};
pub use domain::models::{Action, Event, Flow, Message, MessageType, Phase, Role, Session};
pub use domain::services::{AppState, AppStateProps, Conversation};
