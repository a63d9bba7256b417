//! Pagescope CLI Library
//!
//! Command-line interface for reading page objects against HTML files.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::format_push_string)] // String building is clear and correct

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
mod output;
pub mod tree;

pub use commands::{CheckArgs, Cli, ColorArg, Commands, FormatArg, ReadArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{render_readings, OutputFormat, Reading, Reporter};
pub use tree::{describe, render_tree};
