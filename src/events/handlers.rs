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

use std::time::Instant;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{info, warn};

use crate::{
    App,
    events::AppEvent,
    game::{GameCommand, Phase},
    input::KioskCommand,
    util,
};

/// Routes a key press through the input controller and applies the result.
///
/// `Ctrl+C` is intercepted here to leave the kiosk, since raw mode stops the
/// terminal from delivering it as a signal.
pub(super) fn handle_key(app: &mut App, key: KeyEvent, read_at: Instant) -> Result<()> {
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.event_tx.send(AppEvent::ExitApplication)?;
        return Ok(());
    }

    let now_ms = read_at.saturating_duration_since(app.started_at).as_millis() as u64;
    let view = app.game.view();

    match app.input.on_key(key.code, now_ms, &view) {
        Some(KioskCommand::ToggleFullscreen) => handle_toggle_fullscreen(app),
        Some(KioskCommand::Game(command)) => handle_game_command(app, command),
        None => {}
    }

    Ok(())
}

pub(super) fn handle_game_command(app: &mut App, command: GameCommand) {
    let before = app.game.view();
    let effects = app.game.apply(command);
    let after = app.game.view();

    if after.phase == Phase::Result && before.phase != Phase::Result {
        info!(score = after.correct_count, grade = ?app.game.result_grade(), "quiz finished");
    } else if before.phase != after.phase || command == GameCommand::Reset {
        info!(?command, from = ?before.phase, to = ?after.phase, "phase change");
    }

    app.audio.apply(&effects);
}

pub(super) fn handle_toggle_fullscreen(app: &mut App) {
    let fullscreen = !app.fullscreen;
    match util::term::set_fullscreen(fullscreen) {
        Ok(()) => app.fullscreen = fullscreen,
        Err(e) => warn!("Fullscreen request failed: {}", e),
    }
}

pub(super) fn handle_tick(_app: &mut App) {}
