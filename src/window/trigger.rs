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

use super::policy::LoadIntent;
use super::range::Window;

/// Scroll geometry of the pane showing the materialized window, in rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportMetrics {
    /// Rows scrolled past the top of the rendered content.
    pub scroll_top: usize,
    /// Total rendered rows of the materialized window.
    pub scroll_height: usize,
    /// Visible rows.
    pub client_height: usize,
}

impl ViewportMetrics {
    #[must_use]
    pub fn max_scroll_top(&self) -> usize {
        self.scroll_height.saturating_sub(self.client_height)
    }

    #[must_use]
    pub fn distance_to_top(&self) -> usize {
        self.scroll_top
    }

    #[must_use]
    pub fn distance_to_bottom(&self) -> usize {
        self.scroll_height.saturating_sub(self.scroll_top).saturating_sub(self.client_height)
    }
}

/// Detects when the viewport nears either edge of the rendered window.
///
/// Stateless. The in-flight gate lives in the controller, which only consults
/// the trigger while no cycle is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProximityTrigger {
    margin: usize,
}

impl ProximityTrigger {
    #[must_use]
    pub fn new(margin: usize) -> Self {
        Self { margin }
    }

    #[must_use]
    pub fn margin(&self) -> usize {
        self.margin
    }

    /// Intent to emit for the current geometry, if any.
    ///
    /// When both edges are within the margin the nearer one wins, with ties
    /// going to the older edge.
    #[must_use]
    pub fn evaluate(
        &self,
        metrics: &ViewportMetrics,
        window: Window,
        total: usize,
    ) -> Option<LoadIntent> {
        let top = metrics.distance_to_top();
        let bottom = metrics.distance_to_bottom();
        let older = window.has_older() && top <= self.margin;
        let newer = window.has_newer(total) && bottom <= self.margin;

        match (older, newer) {
            (true, true) if bottom < top => Some(LoadIntent::ExtendNewer),
            (true, _) => Some(LoadIntent::ExtendOlder),
            (false, true) => Some(LoadIntent::ExtendNewer),
            (false, false) => None,
        }
    }
}
