//! pd-cli library
//!
//! Drives the auth controller from a terminal: one command per invocation.

pub(crate) mod cli;
pub(crate) mod commands;
pub(crate) mod error;
pub mod logger;
pub(crate) mod profile_commands;
pub(crate) mod report;
pub(crate) mod runner;

#[cfg(test)]
mod tests;

pub use cli::Cli;
pub use error::{CliError, Result as CliResult};
pub use report::Report;
pub use runner::run;
