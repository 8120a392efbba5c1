//! Conversation state and the rules for changing it.
//!
//! Nothing in here touches the terminal or the network directly. Requests are
//! described as actions and their outcomes come back as events.

pub mod models;
pub mod services;
