//! formprobe CLI library
//!
//! Command-line runner for the contact form scenarios.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::format_push_string)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod logging;
mod output;
mod runner;

pub use commands::{Cli, ColorArg, Commands, FormatArg, RunArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{
    format_report_line, format_scenario_list, format_summary, render_json, OutputFormat,
    ProgressReporter,
};
pub use runner::{check_summary, select_scenarios, suite_config, SuiteCommand};
