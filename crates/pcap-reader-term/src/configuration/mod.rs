//! Configuration for the terminal client.
//!
//! Values come from built-in defaults, an optional TOML file and the command
//! line, in increasing order of precedence.

mod config;

pub use config::*;
