pub mod audio;
pub mod catalog;
pub mod commands;
pub mod db;
pub mod error;
pub mod models;
pub mod mood;
pub mod pathway;
pub mod session;
pub mod settings;
pub mod store;
pub mod timer;
pub mod utils;
pub mod visual;

use std::{fs, path::Path, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

use audio::AudioEngineHandle;
use catalog::VOID_PATH;
use commands::{describe, format_clock, progress_bar, Command, HELP};
use db::Database;
use pathway::PathwayProgress;
use session::{ControllerEvent, OrchestratorOptions, SessionController, SessionOrchestrator};
use settings::{AppConfig, SettingsStore, StorageBackend};
use store::{JsonFileStore, KeyValueStore, MemoryStore};

#[derive(Debug, Parser)]
#[command(name = "shunya")]
#[command(version, about = "Meditation timer and the Path of the Void", long_about = None)]
pub struct Args {
    /// Where settings and progress live. Overrides SHUNYA_DATA_DIR.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Progress storage backend. Overrides the settings file.
    #[arg(long, value_enum)]
    pub storage: Option<StorageBackend>,

    #[arg(long)]
    pub no_audio: bool,

    /// Debug logging and a heartbeat on every tick.
    #[arg(long)]
    pub debug: bool,
}

pub fn run() -> Result<()> {
    let args = Args::parse();

    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(if args.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    log::info!("Shunya starting up...");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;
    runtime.block_on(start(args))
}

async fn start(args: Args) -> Result<()> {
    let data_dir = settings::resolve_data_dir(args.data_dir.clone())?;
    fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;

    let settings_store = SettingsStore::new(data_dir.join("settings.json"))?;
    let config = apply_overrides(settings_store.config(), &args);
    log::info!(
        "Data in {} ({:?} storage)",
        data_dir.display(),
        config.storage
    );

    VOID_PATH.validate()?;
    let store = open_store(config.storage, &data_dir)?;
    let progress = PathwayProgress::load(&VOID_PATH, store);

    let orchestrator = SessionOrchestrator::new(progress, OrchestratorOptions::from(&config));
    let audio = config
        .audio
        .enabled
        .then(|| AudioEngineHandle::new(config.audio.clone()));
    let controller = SessionController::new(orchestrator, &config, audio);

    let result = serve(&controller).await;
    controller.shutdown();
    result
}

fn apply_overrides(mut config: AppConfig, args: &Args) -> AppConfig {
    if let Some(storage) = args.storage {
        config.storage = storage;
    }
    if args.no_audio {
        config.audio.enabled = false;
    }
    if args.debug {
        config.heartbeat_every_ticks = 1;
    }
    config
}

pub fn open_store(backend: StorageBackend, data_dir: &Path) -> Result<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match backend {
        StorageBackend::Json => Arc::new(JsonFileStore::open(data_dir.join("progress.json"))?),
        StorageBackend::Sqlite => Arc::new(Database::open(data_dir.join("shunya.sqlite3"))?),
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    };
    Ok(store)
}

async fn serve(controller: &SessionController) -> Result<()> {
    let mut events = controller.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", describe(&controller.snapshot().await));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match commands::parse(&line) {
                    Ok(None) => {}
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(Command::Help)) => println!("{HELP}"),
                    Ok(Some(Command::Status)) => {
                        println!("{}", describe(&controller.snapshot().await));
                    }
                    Ok(Some(Command::Ui(command))) => {
                        controller.dispatch(command).await;
                    }
                    Err(err) => println!("{err}"),
                }
            }
            event = events.recv() => match event {
                Ok(ControllerEvent::StateChanged(snapshot)) => println!("{}", describe(&snapshot)),
                Ok(ControllerEvent::Heartbeat { remaining_seconds, progress, .. }) => {
                    println!("{} {}", format_clock(remaining_seconds), progress_bar(progress));
                }
                Ok(ControllerEvent::SessionCompleted { stage_id, .. }) => match stage_id {
                    Some(stage_id) => println!("Stage {stage_id} complete. The next stage is open."),
                    None => println!("Session complete."),
                },
                Err(RecvError::Lagged(skipped)) => log::warn!("Dropped {skipped} session events"),
                Err(RecvError::Closed) => break,
            },
        }
    }

    log::info!("Shunya shutting down");
    Ok(())
}
