//! Taskdeck binary entry point and terminal session management.
//!
//! `main` resolves the store connection parameters, issues the one-time
//! initial load, then runs a fixed-cadence frame loop inside an RAII
//! terminal session:
//!
//! 1. Wait for frame tick
//! 2. Drain input queue (non-blocking)
//! 3. Drain completed store calls into local state
//! 4. Render frame
//!
//! The UI stays interactive while store calls are in flight; their
//! completions are reconciled whenever they arrive.

use std::{
    fs::{self, File, OpenOptions},
    io::{Stdout, stdout},
    path::PathBuf,
    sync::Mutex,
    time::Duration,
};

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::time::{MissedTickBehavior, interval};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use taskdeck_config::{StoreSettings, TaskdeckConfig};
use taskdeck_core::App;
use taskdeck_store::RemoteStore;
use taskdeck_tui::{draw, handle_events};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::try_new("warn").expect("warn filter is valid"));

    let (log_file, init_warnings) = open_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // If we can't open a log file, prefer "no logs" over corrupting the TUI
    // by writing to stdout/stderr.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_log_file() -> (Option<(PathBuf, File)>, Vec<String>) {
    let candidates = log_file_candidates();
    let mut warnings = Vec::new();

    for candidate in candidates {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.taskdeck/logs/taskdeck.log
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(".taskdeck").join("logs").join("taskdeck.log"));
    }

    // Fallback: ./.taskdeck/logs/taskdeck.log (useful in constrained environments)
    candidates.push(PathBuf::from(".taskdeck").join("logs").join("taskdeck.log"));

    candidates
}

/// RAII wrapper for terminal state with guaranteed cleanup on drop.
///
/// Raw mode, bracketed paste, and the alternate screen are all restored
/// to their original configuration when the session drops, keeping the
/// terminal usable after panics or early returns.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self> {
        enable_raw_mode()?;

        let mut out = stdout();
        if let Err(err) = execute!(out, EnableBracketedPaste, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            let _ = execute!(out, LeaveAlternateScreen, DisableBracketedPaste);
            return Err(err.into());
        }

        let terminal = match Terminal::new(CrosstermBackend::new(out)) {
            Ok(t) => t,
            Err(err) => {
                let _ = disable_raw_mode();
                let mut out = stdout();
                let _ = execute!(out, LeaveAlternateScreen, DisableBracketedPaste);
                return Err(err.into());
            }
        };

        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableBracketedPaste
        );
        let _ = self.terminal.show_cursor();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = TaskdeckConfig::load();
    let settings = StoreSettings::resolve(config.as_ref()).context("store configuration")?;
    let store = RemoteStore::new(
        &settings.base_url,
        &settings.project_id,
        &settings.collection,
        settings.api_key.clone(),
    )
    .context("store endpoint")?;

    let mut app = App::new(store);
    app.load();

    let mut session = TerminalSession::new()?;
    run_app(&mut session.terminal, &mut app).await
}

const FRAME_DURATION: Duration = Duration::from_millis(16);

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<RemoteStore>,
) -> Result<()> {
    let mut frames = interval(FRAME_DURATION);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        frames.tick().await;

        // Non-blocking input (drain queue only)
        if handle_events(app)? {
            return Ok(());
        }

        app.process_store_events();

        terminal.draw(|frame| draw(frame, app))?;
    }
}
