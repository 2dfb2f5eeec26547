//! pd - paper draft account CLI
//!
//! # Examples
//!
//! ```bash
//! # Sign in and show the profile
//! pd login --email a@b.com --password secret1
//! pd profile show
//!
//! # Machine-readable status
//! pd --json status
//! ```

use pd_cli::{Cli, logger};
use pd_config::Config;

use std::process::ExitCode;

use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    // .env values become PD_* overrides
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(url) = cli.url() {
        config.remote.url = url.to_string();
    }
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }

    let log_file = match config.log_file_path() {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Invalid logging configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = logger::initialize(config.logging.level, log_file, config.logging.colored) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }
    config.log_summary();

    let json = cli.json();
    match pd_cli::run(cli, config).await {
        Ok(report) => {
            match report.render(json) {
                Ok(text) => println!("{}", text),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::FAILURE;
                }
            }

            if report.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
