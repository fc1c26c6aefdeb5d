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

//! Application event distribution.
//!
//! Every input reaches the kiosk as an [`AppEvent`] on a single channel. The
//! [`process_events`] loop takes one event at a time and handles it fully
//! (decode, state change, audio dispatch, redraw) before receiving the next,
//! so game state is never touched by two events at once.

mod handlers;
use handlers::*;

use std::{io::Stdout, time::Instant};

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{App, render::draw};

#[derive(Debug)]
pub(crate) enum AppEvent {
    /// A key event and the moment it was read from the terminal.
    Key(KeyEvent, Instant),

    Tick,

    ExitApplication,
}

/// Runs the main application loop, handling events and rendering the kiosk
/// screen.
///
/// This function loops until an exit event is received or the event channel
/// is closed.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    terminal.draw(|f| draw(f, app))?;

    while let Ok(event) = app.event_rx.recv() {
        match event {
            AppEvent::ExitApplication => break,
            AppEvent::Key(key, read_at) => handle_key(app, key, read_at)?,
            AppEvent::Tick => handle_tick(app),
        }

        terminal.draw(|f| draw(f, app))?;
    }
    Ok(())
}
