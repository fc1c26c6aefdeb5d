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

//! Image asset naming.
//!
//! Maps a [`View`] to the image that belongs on screen. This is a pure lookup
//! with no state of its own.

use crate::game::{Grade, Judgement, Phase, View};

/// Main image for the current screen.
pub(crate) fn screen_image(view: &View) -> String {
    match view.phase {
        Phase::Intro => format!("gametitle{}.png", view.position),
        Phase::Question if view.answer_revealed => format!("kaitou{}.png", view.position),
        Phase::Question => format!("mondai{}.png", view.position),
        Phase::Result => result_image(Grade::from_score(view.correct_count)).to_string(),
    }
}

/// Judgement mark drawn over a revealed answer.
pub(crate) fn overlay_image(view: &View) -> Option<&'static str> {
    if view.phase != Phase::Question || !view.answer_revealed {
        return None;
    }
    match view.judgement {
        Judgement::Correct => Some("maru.png"),
        Judgement::Incorrect => Some("batsu.png"),
        Judgement::Unmarked => None,
    }
}

pub(crate) fn result_image(grade: Grade) -> &'static str {
    match grade {
        Grade::Top => "clearA.png",
        Grade::Middle => "clearB.png",
        Grade::Bottom => "clearC.png",
    }
}
