use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use kinetic_core::{AppConfig, EasingType};

mod commands;

#[derive(Parser)]
#[command(name = "kinetic")]
#[command(author, version, about = "Scroll-linked motion and text scramble effects in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (defaults to ~/.config/kinetic/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the terminal site preview
    Run,
    /// Play a text scramble on stdout
    Scramble {
        /// Text to resolve
        text: String,
        /// Noise characters: "nav", "extended" or a literal set
        #[arg(short, long)]
        alphabet: Option<String>,
        /// Characters resolved per tick
        #[arg(long)]
        step: Option<f64>,
        /// Milliseconds between ticks
        #[arg(long = "interval-ms")]
        interval_ms: Option<u64>,
        /// Seed for reproducible noise
        #[arg(long)]
        seed: Option<u64>,
        /// Redraw a single line instead of printing every tick
        #[arg(long)]
        inline: bool,
    },
    /// Sample a control-point curve or a named preset
    Sample {
        /// Control points as "input:output,..." e.g. "0:0,1:-100"
        #[arg(short, long)]
        points: Option<String>,
        /// Named preset (hero, progress-bar, marquee, featured, work, cta, project-hero, footer)
        #[arg(long)]
        preset: Option<String>,
        /// Inputs to sample; repeatable
        #[arg(long, allow_negative_numbers = true)]
        at: Vec<f64>,
        /// Even intervals across the input range when no --at is given
        #[arg(long, default_value_t = 10)]
        steps: usize,
        /// Per-segment easing (linear, cubic, quintic, ease-out, ease-in-out)
        #[arg(long)]
        easing: Option<EasingType>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the configuration file path
    Path,
    /// Print the effective configuration
    Show,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);

    // `config path` and `config init` must work even when the file is broken
    if let Some(Commands::Config { action }) = &cli.command {
        match action {
            ConfigAction::Path => return commands::config::path(&config_path),
            ConfigAction::Init { force } => return commands::config::init(&config_path, *force),
            ConfigAction::Show => {}
        }
    }

    // Load configuration
    let config = Arc::new(AppConfig::load_from(&config_path)?);

    // The preview owns the screen, so its logs go to a file
    let tui = matches!(cli.command, Some(Commands::Run) | None);
    init_logging(&config, tui)?;

    // Handle commands
    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config).await,
        Some(Commands::Scramble {
            text,
            alphabet,
            step,
            interval_ms,
            seed,
            inline,
        }) => {
            let opts = commands::scramble::ScrambleOptions {
                text,
                alphabet,
                step,
                interval_ms,
                seed,
                inline,
            };
            commands::scramble::run(&config, opts).await
        }
        Some(Commands::Sample {
            points,
            preset,
            at,
            steps,
            easing,
            json,
        }) => commands::sample::run(commands::sample::SampleOptions {
            points,
            preset,
            at,
            steps,
            easing,
            json,
        }),
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Path => commands::config::path(&config_path),
            ConfigAction::Init { force } => commands::config::init(&config_path, force),
        },
    }
}

/// RUST_LOG wins over the configured level
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );

    if to_file {
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}
