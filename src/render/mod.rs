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

//! User interface rendering logic.
//!
//! This module turns the game's [`View`] into a full-screen `ratatui` frame.
//! It never touches game state; it only reads the projection on every redraw.
//!
//! # Rendering Pipeline
//!
//! The primary entry point is the [`draw`] function, which is called after
//! every processed event and on every tick.

mod assets;

use std::path::Path;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::{
    App,
    game::{Grade, Judgement, Phase, QUESTION_COUNT, SLIDE_COUNT, View},
    theme::Theme,
};

/// Renders the kiosk screen to the terminal frame.
///
/// # Arguments
///
/// * `f` - The current terminal frame used for drawing.
/// * `app` - The application state to render.
pub(crate) fn draw(f: &mut Frame, app: &App) {
    let area = f.area();
    let view = app.game.view();

    f.render_widget(
        Block::default().style(Style::default().bg(app.theme.background_colour)),
        area,
    );

    // Screen content, then a single line naming the asset on show
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let lines = screen_lines(&view, &app.theme);
    draw_centred(f, outer[0], lines);

    let image = Path::new(&app.config.image_dir).join(assets::screen_image(&view));
    let mut asset_spans = vec![Span::raw(image.to_string_lossy().into_owned())];
    if let Some(overlay) = assets::overlay_image(&view) {
        asset_spans.push(Span::raw(format!(" + {}", overlay)));
    }
    let asset_line = Paragraph::new(Line::from(asset_spans))
        .alignment(Alignment::Right)
        .fg(app.theme.asset_colour);
    f.render_widget(asset_line, outer[1]);
}

fn draw_centred(f: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    let height = lines.len() as u16;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), rows[1]);
}

fn screen_lines(view: &View, theme: &Theme) -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);

    match view.phase {
        Phase::Intro => vec![
            Line::styled("押神旅館", bold.fg(theme.accent_colour)),
            Line::raw(""),
            Line::styled(
                format!("{} / {}", view.position, SLIDE_COUNT),
                Style::default().fg(theme.caption_colour),
            ),
        ],
        Phase::Question => {
            let caption = if view.answer_revealed { "Answer" } else { "Question" };
            let mut lines = vec![
                Line::styled(
                    format!("{} {} / {}", caption, view.position, QUESTION_COUNT),
                    bold.fg(theme.accent_colour),
                ),
                Line::raw(""),
            ];

            let mark = match view.judgement {
                Judgement::Correct if view.answer_revealed => {
                    Some(Span::styled("◯", bold.fg(theme.correct_colour)))
                }
                Judgement::Incorrect if view.answer_revealed => {
                    Some(Span::styled("✕", bold.fg(theme.incorrect_colour)))
                }
                _ => None,
            };
            lines.push(mark.map(Line::from).unwrap_or_default());
            lines
        }
        Phase::Result => {
            let grade = Grade::from_score(view.correct_count);
            let headline = match grade {
                Grade::Top => "Perfect!",
                Grade::Middle => "Well done!",
                Grade::Bottom => "Thanks for playing!",
            };

            let mut lines = vec![
                Line::styled(headline, bold.fg(theme.accent_colour)),
                Line::raw(""),
            ];
            // The perfect-score artwork carries its own score.
            if view.correct_count < QUESTION_COUNT {
                lines.push(Line::styled(
                    format!("{} / {}", view.correct_count, QUESTION_COUNT),
                    bold.fg(theme.score_colour),
                ));
            }
            lines
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(lines: &[Line]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    fn view(phase: Phase, position: u8, answer_revealed: bool, judgement: Judgement, correct_count: u8) -> View {
        View {
            phase,
            position,
            answer_revealed,
            judgement,
            correct_count,
        }
    }

    #[test]
    fn question_caption_tracks_reveal_and_mark() {
        let theme = Theme::default();

        let hidden = screen_lines(&view(Phase::Question, 4, false, Judgement::Unmarked, 0), &theme);
        assert_eq!(text(&hidden), vec!["Question 4 / 10", "", ""]);

        let wrong = screen_lines(&view(Phase::Question, 4, true, Judgement::Incorrect, 0), &theme);
        assert_eq!(text(&wrong), vec!["Answer 4 / 10", "", "✕"]);
    }

    #[test]
    fn result_hides_score_when_perfect() {
        let theme = Theme::default();

        let perfect = screen_lines(&view(Phase::Result, 10, false, Judgement::Unmarked, 10), &theme);
        assert_eq!(text(&perfect), vec!["Perfect!", ""]);

        let middling = screen_lines(&view(Phase::Result, 10, false, Judgement::Unmarked, 7), &theme);
        assert_eq!(text(&middling), vec!["Well done!", "", "7 / 10"]);
    }
}
