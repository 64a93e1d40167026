//! Command-line interface module.
//!
//! A thin adapter: flags translate into the same parameter bundle the
//! pipeline accepts from any other caller.

mod commands;
mod run;

pub use commands::{Cli, Commands, RunArgs};
pub use run::{handle_profiles_command, handle_run_command};
