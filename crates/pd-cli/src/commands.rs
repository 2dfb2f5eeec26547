use crate::profile_commands::ProfileCommands;
use crate::{CliError, CliResult};

use clap::Subcommand;
use pd_core::FormValidator;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Create an account and its profile
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Defaults to --password
        #[arg(long)]
        confirm_password: Option<String>,
        /// Full name shown on the profile
        #[arg(long)]
        name: Option<String>,
    },

    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Sign out of the current session
    Logout,

    /// Show the signed-in identity
    Whoami,

    /// Show the controller status after session bootstrap
    Status,

    /// Profile operations
    Profile {
        #[command(subcommand)]
        action: ProfileCommands,
    },
}

impl Commands {
    /// Client-side form validation, run before any remote call.
    pub(crate) fn validate(&self) -> CliResult<()> {
        match self {
            Commands::Register {
                email,
                password,
                confirm_password,
                name,
            } => FormValidator::validate_registration(
                email,
                password,
                confirm_password.as_deref().unwrap_or(password),
                name.as_deref().unwrap_or_default(),
            )
            .map_err(CliError::from),
            Commands::Login { email, password } => {
                FormValidator::validate_sign_in(email, password).map_err(CliError::from)
            }
            Commands::Profile { action } => action.validate(),
            Commands::Logout | Commands::Whoami | Commands::Status => Ok(()),
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            Commands::Register { .. } => "register",
            Commands::Login { .. } => "login",
            Commands::Logout => "logout",
            Commands::Whoami => "whoami",
            Commands::Status => "status",
            Commands::Profile { action } => action.name(),
        }
    }
}
