use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use glide_core::GlideConfig;

mod commands;

use commands::{DomainArg, OutputFormat};

#[derive(Parser)]
#[command(name = "glide")]
#[command(author, version, about = "Smooth scrolling motion engine, headless and in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Read configuration from this file instead of ~/.config/glide/config.toml
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(clap::Args, Clone, Debug)]
pub struct ViewportArgs {
    /// Scrollable extent of the virtual viewport
    #[arg(short = 'l', long, default_value_t = 2000.0)]
    pub limit: f64,
    /// Kind of domain (overrides the configured one)
    #[arg(short = 'd', long, value_enum)]
    pub domain: Option<DomainArg>,
    /// Starting position
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub from: f64,
    /// Snap to multiples of this distance on settle
    #[arg(long)]
    pub snap: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a motion on a virtual clock and print every frame
    Simulate {
        #[command(flatten)]
        viewport: ViewportArgs,
        /// Position to scroll to
        #[arg(short = 't', long, allow_negative_numbers = true)]
        to: Option<f64>,
        /// Impulse to apply before the first frame; repeatable
        #[arg(short = 'i', long = "impulse", allow_negative_numbers = true)]
        impulses: Vec<f64>,
        /// Output format
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Give up after this many frames
        #[arg(long, default_value_t = 10_000)]
        max_frames: usize,
    },
    /// Run a motion in real time, printing positions as they are written
    Play {
        #[command(flatten)]
        viewport: ViewportArgs,
        /// Position to scroll to
        #[arg(short = 't', long, allow_negative_numbers = true)]
        to: f64,
        /// Log every engine hook
        #[arg(long)]
        trace: bool,
    },
    /// Interactive terminal demo driven by keys and the mouse wheel
    Tui {
        #[command(flatten)]
        viewport: ViewportArgs,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the configuration file path
    Path,
    /// Print the effective configuration as TOML
    Show,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    // `config path` and `config init` must work even when the file is broken
    if let Commands::Config { action } = &cli.command {
        match action {
            ConfigAction::Path => return commands::config::path(cli.config.as_deref()),
            ConfigAction::Init { force } => {
                return commands::config::init(cli.config.as_deref(), *force)
            }
            ConfigAction::Show => {}
        }
    }

    // Load configuration
    let config = match &cli.config {
        Some(path) => GlideConfig::load_from(path)?,
        None => GlideConfig::load()?,
    };

    match cli.command {
        Commands::Simulate {
            viewport,
            to,
            impulses,
            format,
            max_frames,
        } => commands::simulate::run(&config, &viewport, to, &impulses, format, max_frames),
        Commands::Play { viewport, to, trace } => {
            commands::play::run(&config, &viewport, to, trace).await
        }
        Commands::Tui { viewport } => commands::tui::run(&config, &viewport),
        Commands::Config { .. } => commands::config::show(&config),
    }
}
