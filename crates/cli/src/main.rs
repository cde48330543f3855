mod block_font;
mod console;

use std::{
    fs::{self, OpenOptions},
    io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{Context, Result};
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};
use tides_core::{
    config::{self, AppConfig},
    GameError, GameSession, LineReader,
};

use crate::console::ConsoleRenderer;

/// Buy low, sell high and sail between the ports of old Manila.
#[derive(Debug, Parser)]
#[command(name = "tides", version, about)]
struct Args {
    /// Read settings from this file instead of the default location.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seed market prices for a reproducible game.
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Disable coloured output.
    #[arg(long)]
    no_color: bool,

    /// Mirror log output to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    init_logging(&config.log_dir, args.verbose)?;

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(seed = ?config.seed, color = config.color, "Starting Tides of Manila");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let input = LineReader::new(stdin.lock());
    let renderer = ConsoleRenderer::new(stdout.lock(), config.color);

    let session = match GameSession::setup(input, renderer, rng) {
        Ok(session) => session,
        Err(GameError::InputClosed) => {
            info!("Input closed before the game started");
            return Ok(());
        }
        Err(err) => return Err(err).context("failed to start a game"),
    };
    session.run().context("game aborted")?;
    Ok(())
}

fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load_from(path)?,
        None => {
            config::ensure_default_config()?;
            AppConfig::load()?
        }
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.no_color {
        config.color = false;
    }
    Ok(config)
}

fn init_logging(log_dir: &Path, verbose: bool) -> Result<()> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;
    let log_path = log_dir.join("tides.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(log_file));

    // stdout carries the game screens, so console logging goes to stderr.
    let stderr_layer = verbose.then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .compact()
            .with_writer(io::stderr)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_parse() {
        let args = Args::try_parse_from(["tides", "--seed", "42", "--no-color", "-v"]).unwrap();
        assert_eq!(args.seed, Some(42));
        assert!(args.no_color);
        assert!(args.verbose);
        assert!(args.config.is_none());
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "color = true\nseed = 1\n").unwrap();

        let path_arg = path.to_str().unwrap();
        let args =
            Args::try_parse_from(["tides", "--config", path_arg, "--seed", "9", "--no-color"])
                .unwrap();
        let config = load_config(&args).unwrap();
        assert_eq!(config.seed, Some(9));
        assert!(!config.color);
    }

    #[test]
    fn config_file_values_survive_without_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "color = false\nseed = 5\n").unwrap();

        let path_arg = path.to_str().unwrap();
        let args = Args::try_parse_from(["tides", "--config", path_arg]).unwrap();
        let config = load_config(&args).unwrap();
        assert_eq!(config.seed, Some(5));
        assert!(!config.color);
    }
}
