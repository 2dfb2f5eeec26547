use crate::commands::Commands;

use clap::Parser;

#[derive(Parser)]
#[command(name = "pd")]
#[command(about = "Paper draft account and session CLI")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Remote service URL (overrides config and PD_REMOTE_URL)
    #[arg(long, global = true)]
    pub(crate) url: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub(crate) json: bool,
}

impl Cli {
    pub fn json(&self) -> bool {
        self.json
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}
