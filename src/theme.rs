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

//! Visual styling and color configuration for the kiosk screen.
//!
//! This module defines the kiosk's color palette and provides utilities for
//! converting colors between Ratatui's internal representation and external
//! formats (such as hexadecimal strings) used for terminal emulator styling.

use ratatui::style::Color;

#[derive(Clone, Copy)]
pub(crate) struct Theme {
    pub(crate) background_colour: Color,
    pub(crate) accent_colour: Color,
    pub(crate) caption_colour: Color,
    pub(crate) asset_colour: Color,

    pub(crate) correct_colour: Color,
    pub(crate) incorrect_colour: Color,
    pub(crate) score_colour: Color,
}

impl Default for Theme {
    // Returns the standard kiosk theme.
    fn default() -> Self {
        Self::default_theme()
    }
}

impl Theme {
    // Constructs the default theme, black to match the letterboxed artwork.
    pub(crate) const fn default_theme() -> Self {
        Self {
            background_colour: Color::Rgb(0, 0, 0),
            accent_colour: Color::Rgb(250, 189, 47),
            caption_colour: Color::Rgb(255, 255, 255),
            asset_colour: Color::Rgb(162, 161, 166),

            correct_colour: Color::Rgb(220, 50, 47),
            incorrect_colour: Color::Rgb(38, 139, 210),
            score_colour: Color::Rgb(255, 255, 255),
        }
    }

    /// Converts a [`ratatui::style::Color`] into a CSS-style hexadecimal
    /// string.
    ///
    /// This is primarily used to set the terminal emulator's background color
    /// via escape sequences.
    ///
    /// # Panics
    ///
    /// Panics if the provided color is not a [`Color::Rgb`] variant.
    pub(crate) fn to_hex(colour: Color) -> String {
        match colour {
            Color::Rgb(r, g, b) => format!("#{:02x}{:02x}{:02x}", r, g, b),
            _ => panic!("Unexpected non-RGB colour"),
        }
    }
}
