// msgview - A terminal viewer for very large chat-message archives
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use super::config::WindowConfig;
use super::range::Window;

/// A request to move or resize the materialized window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadIntent {
    ExtendOlder,
    ExtendNewer,
    ResetToTail,
    ResetToHead,
    JumpToIndex(usize),
}

impl LoadIntent {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ExtendOlder => "extend-older",
            Self::ExtendNewer => "extend-newer",
            Self::ResetToTail => "reset-to-tail",
            Self::ResetToHead => "reset-to-head",
            Self::JumpToIndex(_) => "jump-to-index",
        }
    }
}

/// Compute the window that results from applying `intent` to `current`.
///
/// Pure and total. Out-of-range arithmetic saturates at `0` and `total`, and
/// the result never holds more than `max_window` records. An extension always
/// trims the edge opposite to the one it grows.
#[must_use]
pub fn apply(current: Window, intent: LoadIntent, total: usize, config: &WindowConfig) -> Window {
    let current = current.clamp_to(total);
    let max = config.max_window();
    let step = config.load_step();

    match intent {
        LoadIntent::ExtendOlder => {
            let start = current.start().saturating_sub(step);
            let end = if current.end() - start > max { start + max } else { current.end() };
            Window::clamped(start, end, total)
        }
        LoadIntent::ExtendNewer => {
            let end = current.end().saturating_add(step).min(total);
            let start = if end - current.start() > max { end - max } else { current.start() };
            Window::clamped(start, end, total)
        }
        LoadIntent::ResetToTail => Window::clamped(total.saturating_sub(max), total, total),
        LoadIntent::ResetToHead => Window::clamped(0, max.min(total), total),
        LoadIntent::JumpToIndex(index) => {
            if index >= total {
                return current;
            }
            // Near the source end the window comes up short rather than
            // sliding back; the target stays in the newer half.
            let start = index.saturating_sub(max / 2);
            Window::clamped(start, start.saturating_add(max), total)
        }
    }
}

/// Whether moving from `before` to `after` changes the rows above the
/// record the user is looking at, so the scroll offset needs compensation.
#[must_use]
pub fn shifts_content_above(intent: LoadIntent, before: Window, after: Window) -> bool {
    match intent {
        LoadIntent::ExtendOlder => after.start() != before.start() || after.end() != before.end(),
        LoadIntent::ExtendNewer => after.start() != before.start(),
        LoadIntent::ResetToTail | LoadIntent::ResetToHead | LoadIntent::JumpToIndex(_) => false,
    }
}
