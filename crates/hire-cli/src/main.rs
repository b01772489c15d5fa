//! `hire`: equipment-hire tracker for the terminal.
//!
//! # Usage
//!
//! ```text
//! hire                                   # interactive UI
//! hire add --name "Genie Lift" --site "Site A" --rate 120
//! hire list
//! hire archive <ID>
//! hire --config ~/.config/hire/config.toml --store ./hire.db
//! ```

mod app;
mod commands;
mod report;
mod settings;
mod ui;

use std::{fs::OpenOptions, io, path::PathBuf, sync::Mutex, time::Duration};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use commands::Command;
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use hire_core::{
  clock::{Clock, SystemClock},
  storage::SlotStorage,
  tracker::Tracker,
};
use hire_store_sqlite::SqliteSlots;
use ratatui::{Terminal, backend::CrosstermBackend};
use settings::{ConfigFile, LogSink, Settings};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "hire", version, about = "Track hired equipment and what it costs")]
struct Args {
  /// Path to a TOML config file (store_path, currency).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// SQLite file holding the tracker's storage slot.
  #[arg(long, env = "HIRE_STORE", value_name = "FILE")]
  store: Option<PathBuf>,

  /// Currency symbol shown before amounts.
  #[arg(long, env = "HIRE_CURRENCY")]
  currency: Option<String>,

  #[command(subcommand)]
  command: Option<Command>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  let args = Args::parse();
  let file_cfg = ConfigFile::load(args.config.as_deref())?;
  let settings = Settings::resolve(args.store, args.currency, file_cfg);
  init_tracing(&settings.log_sink(args.command.is_none()))?;

  let storage = SqliteSlots::open(&settings.store_path).with_context(|| {
    format!("opening store at {}", settings.store_path.display())
  })?;
  let mut tracker = Tracker::open(storage, SystemClock)
    .context("loading equipment from store")?;

  match args.command {
    Some(command) => {
      commands::run(command, &mut tracker, &settings.currency, &mut io::stdout())
    }
    None => run_tui(App::new(tracker, settings.currency)),
  }
}

fn init_tracing(sink: &LogSink) -> Result<()> {
  let filter = EnvFilter::builder()
    .with_default_directive(LevelFilter::WARN.into())
    .from_env_lossy();

  match sink {
    LogSink::Stderr => {
      tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    }
    LogSink::File(path) => {
      let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
      tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    }
  }
  Ok(())
}

// ─── Terminal UI ──────────────────────────────────────────────────────────────

fn run_tui<S: SlotStorage, C: Clock>(mut app: App<S, C>) -> Result<()> {
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Restore the terminal even if the loop fails.
  let result = run_event_loop(&mut terminal, &mut app);

  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  result
}

fn run_event_loop<S: SlotStorage, C: Clock>(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App<S, C>,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    if !event::poll(Duration::from_millis(250)).context("polling for input")? {
      continue;
    }
    match event::read().context("reading input")? {
      Event::Key(key) if key.kind == KeyEventKind::Press => {
        if !app.handle_key(key) {
          return Ok(());
        }
      }
      // Resize and everything else just triggers a redraw.
      _ => {}
    }
  }
}
