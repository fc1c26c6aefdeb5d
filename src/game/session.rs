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

//! Game session data and the read-only view handed to the renderer.

pub(crate) const SLIDE_COUNT: u8 = 3;
pub(crate) const QUESTION_COUNT: u8 = 10;

/// The coarse game mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Phase {
    Intro,
    Question,
    Result,
}

/// The operator's verdict for the current question.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Judgement {
    #[default]
    Unmarked,
    Correct,
    Incorrect,
}

/// Score tier shown on the result screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Grade {
    Top,
    Middle,
    Bottom,
}

impl Grade {
    /// Grades a final score out of [`QUESTION_COUNT`].
    pub(crate) fn from_score(correct_count: u8) -> Self {
        match correct_count {
            n if n >= QUESTION_COUNT => Grade::Top,
            6..=9 => Grade::Middle,
            _ => Grade::Bottom,
        }
    }
}

/// Mutable state of the single running game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Session {
    pub(crate) phase: Phase,
    pub(crate) slide_index: u8,
    pub(crate) question_number: u8,
    pub(crate) answer_revealed: bool,
    pub(crate) judgement: Judgement,
    pub(crate) correct_count: u8,
    pub(crate) result_voice_played: bool,
}

impl Session {
    pub(crate) fn new() -> Self {
        Self {
            phase: Phase::Intro,
            slide_index: 1,
            question_number: 1,
            answer_revealed: false,
            judgement: Judgement::Unmarked,
            correct_count: 0,
            result_voice_played: false,
        }
    }

    pub(crate) fn view(&self) -> View {
        let position = match self.phase {
            Phase::Intro => self.slide_index,
            Phase::Question | Phase::Result => self.question_number,
        };

        View {
            phase: self.phase,
            position,
            answer_revealed: self.answer_revealed,
            judgement: self.judgement,
            correct_count: self.correct_count,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of the session used for rendering and input gating.
///
/// `position` is the slide index while in [`Phase::Intro`] and the question
/// number otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct View {
    pub(crate) phase: Phase,
    pub(crate) position: u8,
    pub(crate) answer_revealed: bool,
    pub(crate) judgement: Judgement,
    pub(crate) correct_count: u8,
}

impl View {
    pub(crate) fn awaiting_judgement(&self) -> bool {
        self.phase == Phase::Question && !self.answer_revealed
    }
}
