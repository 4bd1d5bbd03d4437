//! Terminal runner (default binary).
//!
//! Loads the configuration, generates the board, optionally starts the
//! network view and then runs the interactive loop: draw, block on input,
//! apply, publish.

use std::fs::OpenOptions;
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use tui_reveal::adapter::{ServerConfig, ViewServer};
use tui_reveal::config::{read_config, Config, ConfigLoad, DEFAULT_CONFIG_PATH};
use tui_reveal::core::{GameState, SnapshotGate};
use tui_reveal::input::handle_key_event;
use tui_reveal::term::{AdapterStatusView, GameView, TerminalRenderer, Viewport};
use tui_reveal::types::GameAction;

/// Reveal hidden tiles on a grid and score their points.
#[derive(Parser, Debug)]
#[command(name = "tui-reveal", version, about)]
struct Args {
    /// Path to the TOML config file (created with defaults if missing)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Board seed, overrides the config file
    #[arg(long)]
    seed: Option<u32>,

    /// Network view address (host:port), overrides config and environment
    #[arg(long)]
    addr: Option<String>,

    /// Write logs to this file; nothing is logged without it
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = args.log_file.as_deref() {
        init_logging(path)?;
    }

    let config = load_config(&args)?;

    let catalog = Arc::new(config.catalog());
    let mut game = GameState::generate(config.width, config.height, catalog, config.seed)
        .context("failed to generate board")?;
    tracing::info!(
        width = config.width,
        height = config.height,
        seed = config.seed,
        tiles = game.board().tile_count(),
        "board generated"
    );

    let gate = Arc::new(SnapshotGate::new());
    gate.publish(game.snapshot());

    // Like the rest of the view, a failed start never stops the game.
    let server = match config.view_addr()? {
        Some(addr) => match ViewServer::start(ServerConfig::new(addr), Arc::clone(&gate)) {
            Ok(server) => Some(server),
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "network view disabled");
                eprintln!("warning: network view disabled: {e:#}");
                None
            }
        },
        None => None,
    };

    // Restore the terminal before a panic message is printed.
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = TerminalRenderer::new().exit();
        original_hook(info);
    }));

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game, &gate, server.as_ref());

    // Always try to restore terminal state.
    let _ = term.exit();

    tracing::info!(score = game.score(), game_over = game.game_over(), "exiting");
    result
}

fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .init();
    Ok(())
}

/// Config file, then environment, then command line.
fn load_config(args: &Args) -> Result<Config> {
    let ConfigLoad {
        mut config,
        warning,
    } = read_config(&args.config);
    if let Some(warning) = warning {
        tracing::warn!(path = %args.config.display(), error = %warning, "config problem");
        eprintln!("warning: {}: {}", args.config.display(), warning);
    }

    config.apply_env();
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(addr) = args.addr.as_ref() {
        config.addr = Some(addr.clone());
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn run(
    term: &mut TerminalRenderer,
    game: &mut GameState,
    gate: &SnapshotGate,
    server: Option<&ViewServer>,
) -> Result<()> {
    let view = GameView::default();

    loop {
        let snapshot = game.snapshot();
        let status = server.map(|s| AdapterStatusView {
            addr: Some(s.addr()),
            client_count: u16::try_from(s.client_count()).unwrap_or(u16::MAX),
        });
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = view.render(&snapshot, status.as_ref(), Viewport::new(w, h));
        term.draw(&fb)?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let Some(action) = handle_key_event(key) else {
                    continue;
                };
                if action == GameAction::Quit {
                    return Ok(());
                }
                match game.apply_action(action) {
                    Ok(outcome) => tracing::debug!(?outcome, action = action.as_str(), "applied"),
                    Err(e) => tracing::debug!(error = %e, action = action.as_str(), "ignored"),
                }
                gate.publish(game.snapshot());
            }
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }
}
