use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use foundry_core::AppConfig;

mod commands;
mod headless;

#[derive(Parser)]
#[command(name = "foundry")]
#[command(author, version, about = "The AI Foundry landing page in your terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (defaults to ~/.config/foundry/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI
    Run {
        /// HTML file to preview and deploy
        #[arg(long)]
        html: Option<PathBuf>,
    },
    /// Print the page routing table
    Routes,
    /// Print the feature-section timeline
    Timeline {
        #[arg(long)]
        json: bool,
    },
    /// Scrub the feature section to a progress and print its state
    Sample {
        /// Progress in 0.0..=1.0
        #[arg(short, long)]
        progress: f64,
        #[arg(long)]
        json: bool,
    },
    /// Print stroke lengths of a built-in icon or an SVG file
    Measure {
        /// brain, globe, share-2 or a path to an .svg file
        icon: String,
    },
    /// Print the effective configuration
    Config {
        /// Write it to the config file, filling in every default
        #[arg(long)]
        write: bool,
    },
    /// Deploy an HTML file and print its URL
    Deploy {
        file: PathBuf,
        /// Project name (defaults to "<prefix>-<unix millis>")
        #[arg(short, long)]
        name: Option<String>,
    },
}

fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if to_file {
        // The TUI owns the terminal, so logs go to a file
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::OpenOptions::new().create(true).append(true).open(&path)?;
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let config = AppConfig::load_from(&config_path)?;
    let config = Arc::new(config);

    let tui = matches!(cli.command, Some(Commands::Run { .. }) | None);
    init_logging(&config, tui)?;

    match cli.command {
        Some(Commands::Run { html }) => commands::run::run(config, html).await,
        None => commands::run::run(config, None).await,
        Some(Commands::Routes) => commands::routes::run(),
        Some(Commands::Timeline { json }) => commands::timeline::run(&config, json),
        Some(Commands::Sample { progress, json }) => commands::sample::run(&config, progress, json),
        Some(Commands::Measure { icon }) => commands::measure::run(&config, &icon),
        Some(Commands::Config { write }) => commands::config::run(&config, &config_path, write),
        Some(Commands::Deploy { file, name }) => {
            commands::deploy::run(&config, &file, name.as_deref()).await
        }
    }
}
