//! Command line interface

pub mod args;
pub mod commands;

pub use args::{Cli, Commands};
pub use commands::{Command, parse_command, run, run_interactive};
