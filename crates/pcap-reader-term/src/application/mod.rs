//! Command line, terminal loop, headless runner and logging bootstrap.

pub mod cli;
pub mod headless;
pub mod logging;
pub mod ui;
