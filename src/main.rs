use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use itertools::Itertools;
use tc_core::configuration::AppConfiguration;
use tc_core::edsm_client::EdsmClient;
use tc_core::notes_store::{JsonFileKeyValueStore, NotesStore};
use tc_core::profile_image_store::ProfileImageStore;
use tc_core::reqwest_helpers::create_client;
use tc_core::system_loader::{LoadOutcome, LoadedSystem, SystemLoader};
use tc_core::trade_board::TradeBoard;
use tc_domain::top_recommendations;
use tracing::{event, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::cli_args::{Cli, Commands, NotesCommand, ProfileImageCommand};

mod cli_args;
mod tables;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let args = Cli::parse();
    let cfg = args.app_configuration();
    event!(Level::DEBUG, "{:?}", cfg);

    match args.command {
        Commands::Routes { system, limit } => run_routes(&cfg, &system, limit).await,
        Commands::System { system } => run_system(&cfg, &system).await,
        Commands::Notes { command } => run_notes(&cfg, command).await,
        Commands::ProfileImage { command } => run_profile_image(&cfg, command).await,
    }
}

fn create_loader(cfg: &AppConfiguration) -> Result<SystemLoader> {
    let client = create_client(cfg.requests_per_second)?;
    Ok(SystemLoader::new(Arc::new(EdsmClient::new(client, &cfg.edsm_base_url))))
}

async fn run_routes(cfg: &AppConfiguration, system: &str, limit: usize) -> Result<()> {
    let loader = create_loader(cfg)?;
    let board_task = tokio::spawn(TradeBoard::new(cfg.cargo_capacity).follow(loader.subscribe()));

    let outcome = loader.load(system).await;
    // closes the state channel, which ends the board's follow loop
    drop(loader);
    let board = board_task.await.context("trade board task failed")?;

    outcome.with_context(|| format!("Failed to load system '{system}'"))?;

    let Some(snapshot) = board.snapshot() else {
        bail!("No system loaded");
    };

    if board.recommendations().is_empty() {
        println!("No profitable trades found between the {} stations of {}", snapshot.stations.len(), snapshot.name);
        return Ok(());
    }

    println!(
        "{} profitable trades in {} (showing {})",
        board.recommendations().len(),
        snapshot.name,
        board.recommendations().len().min(limit)
    );
    println!("{}", tables::render_recommendations(top_recommendations(board.recommendations(), limit), board.cargo_capacity()));
    Ok(())
}

async fn run_system(cfg: &AppConfiguration, system: &str) -> Result<()> {
    let loader = create_loader(cfg)?;

    let loaded: Arc<LoadedSystem> = match loader.load(system).await.with_context(|| format!("Failed to load system '{system}'"))? {
        LoadOutcome::Committed(loaded) => loaded,
        LoadOutcome::Superseded => bail!("Load of '{system}' was superseded"),
    };

    println!("{}", tables::render_system(&loaded.snapshot));
    println!("{}", tables::render_bodies(&loaded.bodies));
    Ok(())
}

async fn run_notes(cfg: &AppConfiguration, command: NotesCommand) -> Result<()> {
    let notes = NotesStore::new(Arc::new(JsonFileKeyValueStore::new(cfg.key_value_store_path())));

    match command {
        NotesCommand::List => {
            let all_notes = notes.load().await?;
            if all_notes.is_empty() {
                println!("No notes yet");
            } else {
                println!("{}", all_notes.iter().enumerate().map(|(idx, note)| format!("{idx}: {note}")).join("\n"));
            }
        }
        NotesCommand::Add { text } => {
            let all_notes = notes.add(text).await?;
            println!("Stored note #{}", all_notes.len() - 1);
        }
        NotesCommand::Remove { index } => {
            let removed = notes.remove(index).await?;
            println!("Removed note: {removed}");
        }
    }
    Ok(())
}

async fn run_profile_image(cfg: &AppConfiguration, command: ProfileImageCommand) -> Result<()> {
    let store = ProfileImageStore::new(&cfg.data_dir);

    match command {
        ProfileImageCommand::Set { path } => {
            let image = tokio::fs::read(&path).await.with_context(|| format!("Failed to read {}", path.display()))?;
            store.save(&image).await?;
            println!("Stored profile image ({} bytes)", image.len());
        }
        ProfileImageCommand::Clear => {
            store.clear().await?;
            println!("Profile image removed");
        }
        ProfileImageCommand::Info => match store.load().await? {
            None => println!("No profile image stored"),
            Some(image) => println!("Profile image at {} ({} bytes)", store.path().display(), image.len()),
        },
    }
    Ok(())
}
