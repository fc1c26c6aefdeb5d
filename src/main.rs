// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # Quiz Kiosk.
//!
//! A single-screen quiz kiosk run from the terminal: an introductory
//! slideshow, ten question and answer rounds judged by an operator at the
//! keyboard, and a graded result screen with a fanfare.
//!
//! ## Architecture
//!
//! * The **Main Thread** owns all game state, processes one event at a time
//!   and renders the screen with `ratatui`.
//! * An **Input Thread** and a **Tick Thread** only forward events into the
//!   main thread's channel.
//! * The **Audio Worker** plays background music and spawns one-shot effect
//!   playback; it never reports back into the game.
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is restored even when the event loop fails.

mod audio;
mod config;
mod events;
mod game;
mod input;
mod render;
mod theme;
mod util;

use anyhow::{Context, Result};
use crossterm::{
    event::{self},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self},
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::{Duration, Instant},
};
use tracing::{info, warn};

use crate::{
    audio::{AudioCoordinator, MpvAudio},
    config::AppConfig,
    events::{AppEvent, process_events},
    game::GameStateMachine,
    input::InputController,
    theme::Theme,
};

/// Application state.
struct App {
    pub config: AppConfig,
    pub theme: Theme,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    /// Origin of the millisecond clock handed to the input controller.
    pub started_at: Instant,

    pub game: GameStateMachine,
    pub input: InputController,
    pub audio: AudioCoordinator<MpvAudio>,

    pub fullscreen: bool,
}

impl App {
    /// Create a new instance of application state.
    pub fn new(config: AppConfig) -> Self {
        let (event_tx, event_rx) = mpsc::channel();

        let audio = AudioCoordinator::new(MpvAudio::new(&config.audio));

        Self {
            config,
            theme: Theme::default(),
            event_tx,
            event_rx,
            started_at: Instant::now(),
            game: GameStateMachine::new(),
            input: InputController::new(),
            audio,
            fullscreen: false,
        }
    }
}

/// The entry point of the application.
///
/// Loads configuration, starts logging, initializes the application state,
/// manages the terminal lifecycle, and returns an error if the event loop
/// fails.
fn main() -> Result<()> {
    let config = config::load_config();

    // Without a log file the kiosk still runs, just silently
    if let Err(e) = util::logging::init_tracing(&config.log_file) {
        eprintln!("Logging disabled: {:#}", e);
    }

    if let Err(e) = config::save_config(&config) {
        warn!("Failed to write configuration: {}", e);
    }

    info!(?config, "Starting quiz kiosk");

    let mut app = App::new(config);

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app);
    restore_terminal(&mut terminal);

    info!("Quiz kiosk stopped");

    res.context("Application error occurred")
}

/// Prepares the terminal for the kiosk screen.
///
/// This function performs the following side effects:
/// * Sets the terminal background color based on the provided theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer and hides the
///   cursor.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Set the background of the entire terminal window, without this we'd get
    // a thin outline in the emulator's own colour
    if let Err(e) = util::term::set_terminal_bg(&Theme::to_hex(app.theme.background_colour)) {
        warn!("Failed to set terminal background: {}", e);
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`] and leaves fullscreen.
/// It is best-effort and does not return a result, as it runs during cleanup.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    util::term::set_fullscreen(false).ok();
    util::term::reset_terminal_bg().ok();
    terminal.show_cursor().ok();
}

/// Starts the input and tick threads, applies the starting phase's audio, and
/// enters the main event loop.
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Spawn a thread to forward raw key events, stamped on arrival.
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(event::Event::Key(key)) => {
                    if tx_keys.send(AppEvent::Key(key, Instant::now())).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("Failed to read terminal event: {}", e);
                    break;
                }
            }
        }
    });

    // Spawn a thread to send a periodic tick so the screen follows terminal
    // resizes without waiting for a key press.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        while tx_tick.send(AppEvent::Tick).is_ok() {
            thread::sleep(Duration::from_millis(250));
        }
    });

    let initial = app.game.initial_effects();
    app.audio.apply(&initial);

    process_events(terminal, app)
}
