//! Wisp CLI - Command-line interface for the Wisp trail engine

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, palette, replay};
use wisp_core::Theme;

#[derive(Parser)]
#[command(name = "wisp")]
#[command(about = "Headless driver for the cursor smoke-trail engine", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a scripted pointer trace through the trail engine
    Replay {
        /// Path to replay script (TOML)
        script: String,

        /// Path to trail config (defaults to .wisp/config.toml if present)
        #[arg(long)]
        config: Option<String>,

        /// Print one JSON line per frame instead of a summary
        #[arg(long)]
        frames: bool,

        /// Simulation frames per second
        #[arg(long, default_value = "60")]
        fps: f64,
    },

    /// Print the resolved trail configuration
    Config {
        /// Path to trail config
        #[arg(long)]
        config: Option<String>,
    },

    /// Print a theme's smoke palette
    Palette {
        /// Theme to print (dark or light); both when omitted
        #[arg(long, value_parser = parse_theme)]
        theme: Option<Theme>,
    },
}

fn parse_theme(s: &str) -> Result<Theme, String> {
    s.parse::<Theme>().map_err(|e| e.to_string())
}

/// Log level from the command line: warn by default, each `-v` one step
/// louder, `--quiet` errors only
fn log_level(verbose: u8, quiet: bool) -> log::LevelFilter {
    match (verbose, quiet) {
        (0, true) => log::LevelFilter::Error,
        (0, false) => log::LevelFilter::Warn,
        (1, _) => log::LevelFilter::Info,
        (2, _) => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG, when set, overrides the flags
    env_logger::Builder::new()
        .filter_level(log_level(cli.verbose, cli.quiet))
        .parse_env(env_logger::Env::default())
        .init();

    match cli.command {
        Commands::Replay {
            script,
            config,
            frames,
            fps,
        } => replay::run(replay::ReplayArgs {
            script,
            config,
            frames,
            fps,
        }),
        Commands::Config { config } => config::run(config.as_deref()),
        Commands::Palette { theme } => palette::run(theme),
    }
}
