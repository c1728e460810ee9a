//! Subcommand handlers driving the lifecycle controller

use std::process::ExitCode;

use tracing::{debug, warn};

use super::context::{self, CliController};
use super::render;
use super::{Cli, Command, CreateArgs, DeleteArgs, ListArgs};
use crate::domain::{KeyId, KeyRecord, OperationState, SelectionError, ValidatorCatalog};

/// Run the parsed command line
pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = context::load_config(&cli)?;
    context::init_logging(&config);

    let catalog = ValidatorCatalog::builtin();

    if let Command::Catalog = cli.command {
        print!("{}", render::catalog(&catalog));
        return Ok(ExitCode::SUCCESS);
    }

    let controller = context::build_controller(&config, cli.token, catalog)?;

    match cli.command {
        Command::Catalog => Ok(ExitCode::SUCCESS),
        Command::List(args) => list(&controller, args).await,
        Command::Create(args) => create(&controller, args).await,
        Command::Delete(args) => delete(&controller, args).await,
    }
}

async fn list(controller: &CliController, args: ListArgs) -> anyhow::Result<ExitCode> {
    if let OperationState::Failed { error, .. } = controller.list().await {
        eprintln!("error: {}", error);
        return Ok(ExitCode::FAILURE);
    }

    let keys = controller.keys();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&keys)?);
    } else {
        print!("{}", render::key_table(&keys, args.show_secrets));
    }

    Ok(ExitCode::SUCCESS)
}

async fn create(controller: &CliController, args: CreateArgs) -> anyhow::Result<ExitCode> {
    apply_selection(controller, &args)?;

    let key = match controller.create().await {
        OperationState::Succeeded { result, .. } => result,
        OperationState::Failed { error, .. } => {
            eprintln!("error: {}", error);
            return Ok(ExitCode::FAILURE);
        }
        other => {
            eprintln!("error: key registration did not complete ({:?})", other);
            return Ok(ExitCode::FAILURE);
        }
    };

    if let Some(error) = controller.snapshot().list().error() {
        warn!(error = %error, "Key created but the listing could not be refreshed");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&key)?);
    } else {
        print!("{}", render::issued_key(&key));
    }

    Ok(ExitCode::SUCCESS)
}

/// Select every validator and the model named on the command line.
///
/// Repeated flags select once; toggling again would deselect.
fn apply_selection(controller: &CliController, args: &CreateArgs) -> Result<(), SelectionError> {
    for id in &args.input {
        if !controller.selection().has_input(&id.as_str().into()) {
            controller.toggle_input(id.as_str())?;
        }
    }

    for id in &args.output {
        if !controller.selection().has_output(&id.as_str().into()) {
            controller.toggle_output(id.as_str())?;
        }
    }

    if let Some(model) = &args.model {
        controller.set_model(model.as_str())?;
    }

    Ok(())
}

/// Match a command line id against the listed keys so the request echoes
/// the id in the form the service issued it. Unlisted ids are parsed.
fn resolve_key_id(keys: &[KeyRecord], raw: &str) -> KeyId {
    keys.iter()
        .map(|k| &k.key_id)
        .find(|id| id.to_string() == raw)
        .cloned()
        .unwrap_or_else(|| raw.parse::<KeyId>().unwrap_or_else(|never| match never {}))
}

async fn delete(controller: &CliController, args: DeleteArgs) -> anyhow::Result<ExitCode> {
    if let OperationState::Failed { error, .. } = controller.list().await {
        debug!(error = %error, "Listing failed, deleting by the id as given");
    }

    let key_id = resolve_key_id(&controller.keys(), &args.key_id);

    match controller.delete(key_id.clone()).await {
        OperationState::Succeeded { result, .. } => {
            println!("{}", result.message);

            if controller.keys().iter().any(|k| k.key_id == key_id) {
                warn!(key_id = %key_id, "Key still present in the refreshed listing");
            }

            Ok(ExitCode::SUCCESS)
        }
        OperationState::Failed { error, .. } => {
            eprintln!("error: {}", error);
            Ok(ExitCode::FAILURE)
        }
        other => {
            eprintln!("error: key deletion did not complete ({:?})", other);
            Ok(ExitCode::FAILURE)
        }
    }
}
