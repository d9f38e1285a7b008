//! letterbox: a full-screen terminal browser for Letterboxd.
//!
//! The binary takes no subcommands. `run` loads configuration, starts file
//! logging and hands the terminal to [`tui::Tui`] until the user quits.

mod args;
mod commands;
pub mod logging;
pub mod tui;

pub use args::Cli;
pub use commands::run;
