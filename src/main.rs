use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use connect_four::config::AppConfig;
use connect_four::error::ConfigError;
use connect_four::game::GameState;
use connect_four::save::{load_game, save_game};
use connect_four::session::{play_move, MoveOutcome};

/// Drive a Connect Four game from the command line.
#[derive(Parser)]
#[command(name = "connect4", about = "Connect Four rules engine")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, global = true, default_value = "connect4.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play a sequence of moves and report the result
    Play {
        /// Zero-based columns, comma separated, played in turn order
        #[arg(long, value_delimiter = ',')]
        moves: Vec<usize>,

        /// Resume from a saved game instead of starting fresh
        #[arg(long)]
        load: Option<PathBuf>,

        /// Write the resulting game to this file
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Print the default configuration as TOML
    DefaultConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli.config, std::io::stderr)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    init_logging(&config);

    match cli.command {
        Command::Play { moves, load, save } => play(&config, &moves, load, save),
        Command::DefaultConfig => {
            print!("{}", AppConfig::default_toml());
            Ok(())
        }
    }
}

/// Load the config under a temporary `RUST_LOG`-filtered subscriber so its
/// warnings are not lost before the configured one is installed.
fn load_config<W>(path: &Path, writer: W) -> Result<AppConfig, ConfigError>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let bootstrap = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .finish();
    tracing::subscriber::with_default(bootstrap, || AppConfig::load_or_default(path))
}

/// `RUST_LOG` wins over the configured level.
fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.to_ascii_lowercase()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn play(
    config: &AppConfig,
    moves: &[usize],
    load: Option<PathBuf>,
    save: Option<PathBuf>,
) -> Result<()> {
    let mut state = match &load {
        Some(path) => {
            load_game(path).with_context(|| format!("loading game from {}", path.display()))?
        }
        None => GameState::new(&config.players.first, &config.players.second),
    };

    let mut outcome = None;
    for &column in moves {
        match play_move(&mut state, column) {
            Ok(MoveOutcome::AlreadyWon) => {
                warn!(column, "game already decided, ignoring remaining moves");
                break;
            }
            Ok(done @ (MoveOutcome::Won(_) | MoveOutcome::Draw)) => {
                outcome = Some(done);
                break;
            }
            Ok(MoveOutcome::Continue { .. }) => {}
            Err(err) => {
                warn!(column, player = %state.current_player(), %err, "move skipped");
                println!("{}: {err}, pick another column", state.current_player());
            }
        }
    }

    match outcome {
        Some(MoveOutcome::Won(winner)) => println!("{winner} is the winner!"),
        Some(MoveOutcome::Draw) => println!("Draw after {} moves", state.turn_count() + 1),
        _ if state.is_won() => println!("Game was already won"),
        _ => println!(
            "No winner yet after {} turns, {} to move",
            state.turn_count(),
            state.current_player()
        ),
    }

    if let Some(path) = &save {
        save_game(path, &state).with_context(|| format!("saving game to {}", path.display()))?;
    }

    Ok(())
}
