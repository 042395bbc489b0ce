use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

use crate::app::App;
use crate::config::{AppConfig, ConfigLoader, CONFIG_ENV};

pub mod commands;

use self::commands::ReplayArgs;

#[derive(Parser, Debug)]
#[command(
    name = "giftgiver",
    version,
    about = "Track who gets which gift from the terminal"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Override the config file location (takes precedence over GIFTGIVER_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Skip reading or writing a config file and use built-in defaults
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Minimum log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch the interactive gift form (default)
    Tui,
    /// Apply scripted steps to an empty gift list and print the result
    Replay(ReplayArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.config {
        env::set_var(CONFIG_ENV, path);
    }

    init_tracing(&cli.log_level)
        .with_context(|| format!("initialising logging at level {}", cli.log_level))?;
    let config = if cli.no_config {
        AppConfig::default()
    } else {
        ConfigLoader::discover()?.load_or_init()?
    };

    let config = Arc::new(config);
    let command = cli.command.unwrap_or(Commands::Tui);
    match command {
        Commands::Tui => {
            let mut app = App::new(config.clone());
            commands::run_tui(&mut app)
        }
        Commands::Replay(args) => commands::replay(config, args),
    }
}

fn init_tracing(level: &str) -> Result<()> {
    static INIT: OnceCell<()> = OnceCell::new();
    INIT.get_or_try_init(|| {
        let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
        fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
        Ok(())
    })
    .map(|_| ())
}
