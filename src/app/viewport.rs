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

use crate::window::{Viewport, ViewportMetrics};

/// Scroll state and last layout of the message pane.
///
/// `measure` is called by the chat renderer once per frame with the row at
/// which every materialized record starts; the window controller reads it
/// through [`Viewport`].
#[derive(Debug, Default, Clone)]
pub struct ChatViewport {
    scroll_top: usize,
    scroll_height: usize,
    client_height: usize,
    window_start: usize,
    record_rows: Vec<usize>,
    held: Option<HeldScroll>,
}

/// User scrolling collected while a compensated extension waits for its
/// render.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct HeldScroll {
    up: usize,
    down: usize,
}

impl ChatViewport {
    pub fn measure(
        &mut self,
        window_start: usize,
        record_rows: Vec<usize>,
        scroll_height: usize,
        client_height: usize,
    ) {
        self.window_start = window_start;
        self.record_rows = record_rows;
        self.scroll_height = scroll_height;
        self.client_height = client_height;
        self.scroll_top = self.scroll_top.min(self.max_scroll_top());
    }

    #[must_use]
    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    #[must_use]
    pub fn client_height(&self) -> usize {
        self.client_height
    }

    #[must_use]
    pub fn max_scroll_top(&self) -> usize {
        self.scroll_height.saturating_sub(self.client_height)
    }

    pub fn scroll_up(&mut self, rows: usize) {
        if let Some(held) = self.held.as_mut() {
            held.up = held.up.saturating_add(rows);
            return;
        }
        self.scroll_top = self.scroll_top.saturating_sub(rows);
    }

    pub fn scroll_down(&mut self, rows: usize) {
        if let Some(held) = self.held.as_mut() {
            held.down = held.down.saturating_add(rows);
            return;
        }
        self.scroll_top = self.scroll_top.saturating_add(rows).min(self.max_scroll_top());
    }

    /// Collect scrolling instead of applying it, until [`Self::release`].
    pub fn hold(&mut self) {
        if self.held.is_none() {
            self.held = Some(HeldScroll::default());
        }
    }

    /// Apply the scrolling collected since [`Self::hold`] on top of the
    /// current offset.
    pub fn release(&mut self) {
        let Some(held) = self.held.take() else {
            return;
        };
        if held.down >= held.up {
            self.scroll_down(held.down - held.up);
        } else {
            self.scroll_up(held.up - held.down);
        }
    }

    /// Source index of the record covering `row`.
    #[must_use]
    pub fn record_at_row(&self, row: usize) -> Option<usize> {
        let rendered = self.record_rows.partition_point(|&start| start <= row);
        rendered.checked_sub(1).map(|i| self.window_start + i)
    }
}

impl Viewport for ChatViewport {
    fn metrics(&self) -> ViewportMetrics {
        ViewportMetrics {
            scroll_top: self.scroll_top,
            scroll_height: self.scroll_height,
            client_height: self.client_height,
        }
    }

    fn locate_record(&self, index: usize) -> Option<usize> {
        index.checked_sub(self.window_start).and_then(|i| self.record_rows.get(i).copied())
    }

    /// Above the first record (on the older indicator) the first record
    /// counts as the top.
    fn top_record(&self) -> Option<usize> {
        self.record_at_row(self.scroll_top).or_else(|| {
            (!self.record_rows.is_empty()).then_some(self.window_start)
        })
    }

    fn scroll_to(&mut self, scroll_top: usize) {
        self.scroll_top = scroll_top.min(self.max_scroll_top());
    }
}
