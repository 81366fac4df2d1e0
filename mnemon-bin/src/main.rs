use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use mnemon_backup::{BackupClient, BackupPaths, BackupScheduler, GitHubRemote};
use mnemon_config::{ConfigLoader, MnemonConfig, load_persona};
use mnemon_memory::{Journal, MemoryStore};
use mnemon_server::{AccessGate, AppState, build_router};

#[derive(Parser)]
#[command(name = "mnemon", version, about = "Persistent append-only memory service")]
struct Cli {
    /// Path to mnemon.toml (default: MNEMON_CONFIG or ~/.mnemon/mnemon.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service
    Serve {
        /// Listen address override, e.g. 0.0.0.0:8321
        #[arg(long)]
        listen: Option<String>,
    },
    /// Print the effective configuration (token redacted)
    Config,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> mnemon_core::Result<()> {
    let config = ConfigLoader::load(cli.config.as_deref())?;
    match cli.command {
        Command::Serve { listen } => serve(config, listen).await,
        Command::Config => print_config(config),
    }
}

async fn serve(mut config: MnemonConfig, listen: Option<String>) -> mnemon_core::Result<()> {
    if let Some(listen) = listen {
        config.server.listen = listen;
    }

    let persona = load_persona(&config.persona.path);
    println!("mnemon v{}", env!("CARGO_PKG_VERSION"));
    println!("   Identity: {}", persona.identity);
    println!("   Memory:   {}", config.memory.primary_path.display());
    println!();

    let journal = Journal::new(&config.memory.journal_path);
    let store = Arc::new(MemoryStore::open(
        &config.memory.primary_path,
        &config.memory.mirror_path,
        journal.clone(),
    )?);

    let (backup, scheduler) = if config.backup.credentials_present() {
        let remote = GitHubRemote::new(
            config.backup.token.clone().unwrap_or_default(),
            config.backup.repo.clone().unwrap_or_default(),
        )?;
        let client = Arc::new(BackupClient::new(
            Arc::new(remote),
            BackupPaths {
                memory_file: config.memory.primary_path.clone(),
                remote_memory_path: config.backup.memory_path.clone(),
                remote_code_path: config.backup.code_path.clone(),
                code_snapshot: config.backup.code_snapshot.clone(),
            },
            journal.clone(),
        ));
        let scheduler = BackupScheduler::spawn(Arc::clone(&client));
        (Some(client), Some(scheduler))
    } else {
        if config.backup.auto {
            warn!("auto backup enabled but remote credentials are not configured");
        }
        (None, None)
    };

    let state = Arc::new(AppState {
        persona,
        store,
        gate: AccessGate::new(config.server.secret.clone()),
        backup,
        scheduler,
        auto_backup: config.backup.auto,
    });

    journal.record("service started");

    let router = build_router(state, config.server.cors);
    tracing::info!(listen = %config.server.listen, "starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.server.listen)
        .await
        .map_err(|e| {
            mnemon_core::MnemonError::Config(format!(
                "failed to bind {}: {e}",
                config.server.listen
            ))
        })?;
    axum::serve(listener, router)
        .await
        .map_err(|e| mnemon_core::MnemonError::Config(format!("server error: {e}")))?;

    Ok(())
}

fn print_config(mut config: MnemonConfig) -> mnemon_core::Result<()> {
    if config.backup.token.is_some() {
        config.backup.token = Some("<redacted>".into());
    }
    if config.server.secret.is_some() {
        config.server.secret = Some("<redacted>".into());
    }
    let rendered = toml::to_string_pretty(&config)
        .map_err(|e| mnemon_core::MnemonError::Config(e.to_string()))?;
    println!("{rendered}");
    Ok(())
}
