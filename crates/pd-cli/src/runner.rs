use crate::commands::Commands;
use crate::profile_commands::ProfileCommands;
use crate::{Cli, CliResult, Report};

use std::sync::Arc;

use log::info;
use pd_auth::{AuthController, NO_AUTHENTICATED_USER, RemoteClient};
use pd_config::Config;
use pd_core::AuthOutcome;

/// Validate the command, start the controller against the configured
/// service, wait for the session bootstrap, run one operation and tear down.
pub async fn run(cli: Cli, config: Config) -> CliResult<Report> {
    cli.command.validate()?;

    let client = Arc::new(RemoteClient::from_config(&config)?);
    let controller = AuthController::start(client.clone(), client);

    let initial = controller.settled().await;
    info!("Session bootstrap settled: {}", initial.status());

    let report = execute(&controller, cli.command).await;

    controller.shutdown().await;
    Ok(report)
}

async fn execute(controller: &AuthController, command: Commands) -> Report {
    let name = command.name();
    match command {
        Commands::Register {
            email,
            password,
            name: full_name,
            ..
        } => {
            let outcome = controller
                .register(&email, &password, full_name.as_deref())
                .await;
            Report::outcome(name, outcome)
        }
        Commands::Login { email, password } => {
            Report::outcome(name, controller.sign_in(&email, &password).await)
        }
        Commands::Logout => {
            controller.sign_out().await;
            let outcome = match controller.snapshot().error {
                Some(error) => AuthOutcome::failed(error),
                None => AuthOutcome::ok(),
            };
            Report::outcome(name, outcome)
        }
        Commands::Whoami => match controller.snapshot().identity {
            Some(identity) => Report::identity(&identity),
            None => Report::outcome(name, AuthOutcome::failed(NO_AUTHENTICATED_USER)),
        },
        Commands::Status => Report::status(&controller.snapshot()),
        Commands::Profile { action } => match action {
            ProfileCommands::Show => match controller.snapshot().profile {
                Some(profile) => Report::profile(&profile),
                None => Report::outcome(name, AuthOutcome::failed(NO_AUTHENTICATED_USER)),
            },
            ProfileCommands::Update { name: full_name, api_key } => {
                let patch = ProfileCommands::patch(full_name.as_deref(), api_key.as_deref());
                Report::outcome(name, controller.update_profile(&patch).await)
            }
        },
    }
}
