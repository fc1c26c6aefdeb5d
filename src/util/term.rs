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

//! Terminal environment utilities.
//!
//! This module manipulates the terminal emulator itself, such as its
//! background colour and window state, using OSC and CSI escape sequences.
//!
//! # Compatibility
//!
//! These functions rely on the terminal emulator supporting the specific
//! codes. Most modern terminals support the OSC colour codes; the fullscreen
//! request is an XTerm window operation that some emulators ignore or disable.

use std::io::{self, Write};

/// Sets the terminal background color using an OSC 11 escape sequence.
///
/// # Arguments
///
/// * `hex_color` - A string slice representing the color (e.g., `"#1e1e1e"`).
pub(crate) fn set_terminal_bg(hex_color: &str) -> io::Result<()> {
    write_sequence(&mut io::stdout(), &format!("\x1b]11;{}\x07", hex_color))
}

/// Resets the terminal background to its default color (OSC 111).
pub(crate) fn reset_terminal_bg() -> io::Result<()> {
    write_sequence(&mut io::stdout(), "\x1b]111\x07")
}

/// Asks the terminal window to enter or leave fullscreen.
pub(crate) fn set_fullscreen(fullscreen: bool) -> io::Result<()> {
    write_sequence(&mut io::stdout(), fullscreen_sequence(fullscreen))
}

fn fullscreen_sequence(fullscreen: bool) -> &'static str {
    if fullscreen { "\x1b[10;1t" } else { "\x1b[10;0t" }
}

fn write_sequence(out: &mut impl Write, sequence: &str) -> io::Result<()> {
    out.write_all(sequence.as_bytes())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fullscreen_uses_xterm_window_ops() {
        let mut out = Vec::new();
        write_sequence(&mut out, fullscreen_sequence(true)).unwrap();
        write_sequence(&mut out, fullscreen_sequence(false)).unwrap();

        assert_eq!(out, b"\x1b[10;1t\x1b[10;0t");
    }
}
