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

//! Quiz game state machine.
//!
//! The [`GameStateMachine`] owns the single [`Session`] and is the only thing
//! that mutates it. Every command runs to completion and returns the list of
//! [`Effect`]s it produced, leaving the actual audio dispatch to the caller.
//!
//! Commands are total: anything that is not valid for the current phase is
//! silently ignored and yields no effects.

mod session;

pub(crate) use session::{Grade, Judgement, Phase, QUESTION_COUNT, SLIDE_COUNT, View};

use session::Session;

/// Identifies a fire-and-forget sound cue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SoundEffect {
    ButtonPress,
    Correct,
    Incorrect,
    Fanfare,
    ResultVoice,
}

/// Side effect emitted by a state transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Effect {
    PhaseExited(Phase),
    PhaseEntered(Phase),
    Sound(SoundEffect),
}

/// A decoded operator command for the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum GameCommand {
    Advance,
    MarkCorrect,
    MarkIncorrect,
    AcknowledgePress,
    Reset,
}

pub(crate) struct GameStateMachine {
    session: Session,
}

impl GameStateMachine {
    pub(crate) fn new() -> Self {
        Self {
            session: Session::new(),
        }
    }

    /// Effects describing entry into the starting phase.
    pub(crate) fn initial_effects(&self) -> Vec<Effect> {
        vec![Effect::PhaseEntered(self.session.phase)]
    }

    pub(crate) fn apply(&mut self, command: GameCommand) -> Vec<Effect> {
        match command {
            GameCommand::Advance => self.advance(),
            GameCommand::MarkCorrect => self.mark_correct(),
            GameCommand::MarkIncorrect => self.mark_incorrect(),
            GameCommand::AcknowledgePress => self.acknowledge_press(),
            GameCommand::Reset => self.reset(),
        }
    }

    /// The single "confirm / next" action.
    pub(crate) fn advance(&mut self) -> Vec<Effect> {
        let s = &mut self.session;

        match s.phase {
            Phase::Intro if s.slide_index < SLIDE_COUNT => {
                s.slide_index += 1;
                vec![]
            }
            Phase::Intro => {
                s.question_number = 1;
                s.answer_revealed = false;
                s.judgement = Judgement::Unmarked;
                self.enter(Phase::Question)
            }
            Phase::Question if !s.answer_revealed => vec![],
            Phase::Question if s.question_number < QUESTION_COUNT => {
                s.question_number += 1;
                s.answer_revealed = false;
                s.judgement = Judgement::Unmarked;
                vec![]
            }
            Phase::Question => {
                s.answer_revealed = false;
                s.result_voice_played = false;
                self.enter(Phase::Result)
            }
            Phase::Result if !s.result_voice_played => {
                s.result_voice_played = true;
                vec![Effect::Sound(SoundEffect::ResultVoice)]
            }
            Phase::Result => vec![],
        }
    }

    /// Judges the current question correct, crediting the score at most once.
    pub(crate) fn mark_correct(&mut self) -> Vec<Effect> {
        let s = &mut self.session;
        if s.phase != Phase::Question {
            return vec![];
        }

        if s.judgement != Judgement::Correct {
            s.correct_count += 1;
        }
        s.judgement = Judgement::Correct;
        s.answer_revealed = true;

        vec![Effect::Sound(SoundEffect::Correct)]
    }

    /// Judges the current question incorrect, withdrawing any earlier credit.
    pub(crate) fn mark_incorrect(&mut self) -> Vec<Effect> {
        let s = &mut self.session;
        if s.phase != Phase::Question {
            return vec![];
        }

        if s.judgement == Judgement::Correct {
            s.correct_count -= 1;
        }
        s.judgement = Judgement::Incorrect;
        s.answer_revealed = true;

        vec![Effect::Sound(SoundEffect::Incorrect)]
    }

    /// Operator cue before judging; sound only.
    pub(crate) fn acknowledge_press(&mut self) -> Vec<Effect> {
        if self.session.view().awaiting_judgement() {
            vec![Effect::Sound(SoundEffect::ButtonPress)]
        } else {
            vec![]
        }
    }

    /// Returns the session to its initial state from any phase.
    pub(crate) fn reset(&mut self) -> Vec<Effect> {
        let previous = self.session.phase;
        self.session = Session::new();

        if previous == self.session.phase {
            vec![]
        } else {
            vec![
                Effect::PhaseExited(previous),
                Effect::PhaseEntered(self.session.phase),
            ]
        }
    }

    pub(crate) fn view(&self) -> View {
        self.session.view()
    }

    pub(crate) fn result_grade(&self) -> Grade {
        Grade::from_score(self.session.correct_count)
    }

    fn enter(&mut self, next: Phase) -> Vec<Effect> {
        let previous = self.session.phase;
        self.session.phase = next;
        vec![Effect::PhaseExited(previous), Effect::PhaseEntered(next)]
    }
}

impl Default for GameStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
