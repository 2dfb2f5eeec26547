use crate::{CliError, CliResult};

use clap::Subcommand;
use pd_core::{FormValidator, ProfilePatch};

#[derive(Subcommand)]
pub(crate) enum ProfileCommands {
    /// Show the signed-in user's profile
    Show,
    /// Update the signed-in user's profile
    Update {
        /// New full name
        #[arg(long)]
        name: Option<String>,
        /// New API key; blank leaves the stored key unchanged
        #[arg(long)]
        api_key: Option<String>,
    },
}

impl ProfileCommands {
    pub(crate) fn validate(&self) -> CliResult<()> {
        let ProfileCommands::Update { name, api_key } = self else {
            return Ok(());
        };

        if name.is_none() && api_key.is_none() {
            return Err(CliError::usage("Nothing to update: pass --name and/or --api-key"));
        }
        if let Some(name) = name {
            FormValidator::validate_full_name(name)?;
        }
        if let Some(api_key) = api_key {
            FormValidator::validate_api_key(api_key)?;
        }
        Ok(())
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            ProfileCommands::Show => "profile show",
            ProfileCommands::Update { .. } => "profile update",
        }
    }

    pub(crate) fn patch(name: Option<&str>, api_key: Option<&str>) -> ProfilePatch {
        let mut patch = ProfilePatch::default();
        if let Some(name) = name {
            patch = patch.full_name(name);
        }
        if let Some(api_key) = api_key {
            patch = patch.grok_api_key(api_key);
        }
        patch.normalized()
    }
}
