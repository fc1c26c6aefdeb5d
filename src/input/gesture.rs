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

//! Hidden reset gesture tracking.

/// Maximum gap between consecutive presses that still counts as a combo.
pub(crate) const RESET_WINDOW_MS: u64 = 500;

/// Number of consecutive presses that triggers a reset.
pub(crate) const RESET_PRESSES: u32 = 5;

/// Counts rapid repeated presses of the reset key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ResetGesture {
    press_count: u32,
    last_press_ms: Option<u64>,
}

impl ResetGesture {
    /// Records a press at `now_ms` and reports whether the gesture completed.
    ///
    /// A completed gesture clears the tracker, so the next press starts a new
    /// count from one.
    pub(crate) fn register(&mut self, now_ms: u64) -> bool {
        let within_window = self
            .last_press_ms
            .is_some_and(|last| now_ms.saturating_sub(last) < RESET_WINDOW_MS);

        self.press_count = if within_window { self.press_count + 1 } else { 1 };
        self.last_press_ms = Some(now_ms);

        if self.press_count >= RESET_PRESSES {
            self.clear();
            true
        } else {
            false
        }
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    #[cfg(test)]
    pub(crate) fn press_count(&self) -> u32 {
        self.press_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_quick_presses_complete() {
        let mut gesture = ResetGesture::default();

        let fired: Vec<bool> = [1000, 1100, 1200, 1300, 1400]
            .into_iter()
            .map(|t| gesture.register(t))
            .collect();

        assert_eq!(fired, vec![false, false, false, false, true]);
        assert_eq!(gesture, ResetGesture::default());
    }

    #[test]
    fn slow_gap_restarts_count() {
        let mut gesture = ResetGesture::default();
        for t in [0, 100, 200, 300] {
            gesture.register(t);
        }
        assert_eq!(gesture.press_count(), 4);

        assert!(!gesture.register(801));
        assert_eq!(gesture.press_count(), 1);
    }

    #[test]
    fn gap_of_exactly_window_is_too_slow() {
        let mut gesture = ResetGesture::default();
        gesture.register(0);
        gesture.register(RESET_WINDOW_MS);

        assert_eq!(gesture.press_count(), 1);
    }

    #[test]
    fn window_is_measured_between_consecutive_presses() {
        let mut gesture = ResetGesture::default();

        // Total span exceeds the window but every gap is inside it.
        for t in [0, 450, 900, 1350] {
            assert!(!gesture.register(t));
        }
        assert!(gesture.register(1800));
    }
}
