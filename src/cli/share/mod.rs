//! Share commands - run a subcommand against the configured document store

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;
use tracing::debug;

use super::{Cli, Command, ShareArgs};
use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::infrastructure::model::JsonFileModelRepository;
use crate::infrastructure::services::{ShareSettings, SharedModelService};

/// Load configuration, open the store and execute the parsed command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;
    logging::init_logging(&config.logging);

    let path = cli
        .store
        .unwrap_or_else(|| PathBuf::from(&config.repository.path));
    debug!(path = %path.display(), "Opening model store");

    let repository = JsonFileModelRepository::open(&path)
        .await
        .with_context(|| format!("failed to open model store '{}'", path.display()))?;
    let service = SharedModelService::new(Arc::new(repository));

    match cli.command {
        Command::Resolve { share_id } => {
            let view = service.find_shared_model(&share_id).await?;
            print_json(&view)
        }
        Command::Share(args) => {
            let share = service
                .share_model(&args.model_id, settings_from(&args))
                .await?;
            print_json(&share)
        }
        Command::Revoke { model_id } => {
            service.revoke_share(&model_id).await?;
            Ok(())
        }
        Command::Import { share_id, owner } => {
            let model = service.import_shared_model(&share_id, &owner).await?;
            print_json(&model)
        }
    }
}

fn settings_from(args: &ShareArgs) -> ShareSettings {
    ShareSettings {
        active: !args.inactive,
        import_allowed: args.import_allowed,
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
