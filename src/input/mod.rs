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

//! Keyboard decoding for the operator console.
//!
//! The [`InputController`] turns a raw key code and its arrival time into at
//! most one [`KioskCommand`]. The fullscreen, reset and advance keys are
//! global and checked first; the judging keys only apply while a question is
//! on screen.

mod gesture;

use crossterm::event::KeyCode;
use tracing::debug;

use crate::game::{GameCommand, Phase, View};

use gesture::ResetGesture;

/// A decoded key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum KioskCommand {
    /// Handled by the presentation layer, never reaches the game.
    ToggleFullscreen,
    Game(GameCommand),
}

#[derive(Debug, Default)]
pub(crate) struct InputController {
    reset_gesture: ResetGesture,
}

impl InputController {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Decodes a single key press.
    ///
    /// # Arguments
    ///
    /// * `code` - The key that was pressed.
    /// * `now_ms` - Arrival time of the press in milliseconds on a monotonic
    ///   clock.
    /// * `view` - The current game view, used to gate the judging keys.
    pub(crate) fn on_key(&mut self, code: KeyCode, now_ms: u64, view: &View) -> Option<KioskCommand> {
        let in_question = view.phase == Phase::Question;

        match code {
            KeyCode::Char('f' | 'F') => Some(KioskCommand::ToggleFullscreen),
            KeyCode::Char('9') => {
                if self.reset_gesture.register(now_ms) {
                    debug!("reset gesture completed");
                    Some(KioskCommand::Game(GameCommand::Reset))
                } else {
                    None
                }
            }
            KeyCode::Enter => Some(KioskCommand::Game(GameCommand::Advance)),
            KeyCode::Char('a' | 'A') if view.awaiting_judgement() => {
                Some(KioskCommand::Game(GameCommand::AcknowledgePress))
            }
            KeyCode::Char('1') if in_question => Some(KioskCommand::Game(GameCommand::MarkCorrect)),
            KeyCode::Char('3') if in_question => Some(KioskCommand::Game(GameCommand::MarkIncorrect)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameStateMachine, Judgement};

    fn view(phase: Phase, answer_revealed: bool) -> View {
        View {
            phase,
            position: 1,
            answer_revealed,
            judgement: Judgement::Unmarked,
            correct_count: 0,
        }
    }

    fn game(command: GameCommand) -> Option<KioskCommand> {
        Some(KioskCommand::Game(command))
    }

    #[test]
    fn global_keys_work_in_every_phase() {
        let mut input = InputController::new();

        for v in [
            view(Phase::Intro, false),
            view(Phase::Question, false),
            view(Phase::Question, true),
            view(Phase::Result, false),
        ] {
            assert_eq!(input.on_key(KeyCode::Enter, 0, &v), game(GameCommand::Advance));
            assert_eq!(input.on_key(KeyCode::Char('f'), 0, &v), Some(KioskCommand::ToggleFullscreen));
            assert_eq!(input.on_key(KeyCode::Char('F'), 0, &v), Some(KioskCommand::ToggleFullscreen));
        }
    }

    #[test]
    fn judging_keys_only_during_question() {
        let mut input = InputController::new();
        let question = view(Phase::Question, false);

        assert_eq!(input.on_key(KeyCode::Char('1'), 0, &question), game(GameCommand::MarkCorrect));
        assert_eq!(input.on_key(KeyCode::Char('3'), 0, &question), game(GameCommand::MarkIncorrect));
        assert_eq!(input.on_key(KeyCode::Char('a'), 0, &question), game(GameCommand::AcknowledgePress));
        assert_eq!(input.on_key(KeyCode::Char('A'), 0, &question), game(GameCommand::AcknowledgePress));

        for v in [view(Phase::Intro, false), view(Phase::Result, false)] {
            assert_eq!(input.on_key(KeyCode::Char('1'), 0, &v), None);
            assert_eq!(input.on_key(KeyCode::Char('3'), 0, &v), None);
            assert_eq!(input.on_key(KeyCode::Char('a'), 0, &v), None);
        }
    }

    #[test]
    fn judgement_can_change_after_reveal_but_cue_cannot() {
        let mut input = InputController::new();
        let revealed = view(Phase::Question, true);

        assert_eq!(input.on_key(KeyCode::Char('a'), 0, &revealed), None);
        assert_eq!(input.on_key(KeyCode::Char('1'), 0, &revealed), game(GameCommand::MarkCorrect));
        assert_eq!(input.on_key(KeyCode::Char('3'), 0, &revealed), game(GameCommand::MarkIncorrect));
    }

    #[test]
    fn other_keys_are_ignored() {
        let mut input = InputController::new();
        let question = view(Phase::Question, false);

        for code in [KeyCode::Char('2'), KeyCode::Char('q'), KeyCode::Esc, KeyCode::Char(' ')] {
            assert_eq!(input.on_key(code, 0, &question), None);
        }
    }

    #[test]
    fn fifth_quick_nine_resets_from_any_phase() {
        for phase in [Phase::Intro, Phase::Question, Phase::Result] {
            let mut input = InputController::new();
            let v = view(phase, false);

            for t in [10_000, 10_200, 10_400, 10_600] {
                assert_eq!(input.on_key(KeyCode::Char('9'), t, &v), None);
            }
            assert_eq!(input.on_key(KeyCode::Char('9'), 10_800, &v), game(GameCommand::Reset));
        }
    }

    #[test]
    fn sixth_press_after_slow_gap_starts_fresh() {
        let mut input = InputController::new();
        let v = view(Phase::Question, false);

        for t in [0, 100, 200, 300] {
            input.on_key(KeyCode::Char('9'), t, &v);
        }
        assert_eq!(input.on_key(KeyCode::Char('9'), 400, &v), game(GameCommand::Reset));

        assert_eq!(input.on_key(KeyCode::Char('9'), 1_000, &v), None);
        for t in [1_100, 1_200, 1_300] {
            assert_eq!(input.on_key(KeyCode::Char('9'), t, &v), None);
        }
        assert_eq!(input.on_key(KeyCode::Char('9'), 1_400, &v), game(GameCommand::Reset));
    }

    #[test]
    fn interleaved_keys_do_not_break_the_combo() {
        let mut input = InputController::new();
        let v = view(Phase::Question, false);

        for t in [0, 100, 200] {
            input.on_key(KeyCode::Char('9'), t, &v);
        }
        input.on_key(KeyCode::Enter, 250, &v);
        input.on_key(KeyCode::Char('9'), 300, &v);

        assert_eq!(input.on_key(KeyCode::Char('9'), 400, &v), game(GameCommand::Reset));
    }

    #[test]
    fn reset_gesture_returns_game_to_start() {
        let mut input = InputController::new();
        let mut machine = GameStateMachine::new();
        for _ in 0..3 {
            machine.advance();
        }
        machine.mark_correct();
        machine.advance();

        let mut t = 5_000;
        for _ in 0..5 {
            if let Some(KioskCommand::Game(command)) = input.on_key(KeyCode::Char('9'), t, &machine.view()) {
                machine.apply(command);
            }
            t += 120;
        }

        let view = machine.view();
        assert_eq!(view.phase, Phase::Intro);
        assert_eq!(view.position, 1);
        assert_eq!(view.correct_count, 0);
    }
}
