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

use super::trigger::ViewportMetrics;

/// The pane that renders the materialized window.
///
/// This is the only seam between the engine and the presentation layer. The
/// engine reads geometry through it before a mutation and again once the new
/// window has been laid out, then moves the scroll offset.
pub trait Viewport {
    fn metrics(&self) -> ViewportMetrics;

    /// Row offset (from the top of the rendered content) of the first row
    /// belonging to the record at `index` in the source, if it is rendered.
    fn locate_record(&self, index: usize) -> Option<usize>;

    /// Source index of the record covering the first visible row.
    fn top_record(&self) -> Option<usize>;

    /// Move the scroll offset. Implementations clamp to
    /// `[0, scroll_height - client_height]`.
    fn scroll_to(&mut self, scroll_top: usize);
}

/// A record laid out identically before and after a mutation, and the row
/// it started on before the mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinnedRow {
    pub record: usize,
    pub row: usize,
}

/// Scroll geometry captured right before a mutation that can change the
/// rows above the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollAnchor {
    pub scroll_height: usize,
    pub scroll_top: usize,
    pub pinned: Option<PinnedRow>,
}

impl ScrollAnchor {
    /// Capture the current geometry, pinning `record` when it is rendered.
    /// Restoring the pinned row also restores how far into that record the
    /// view was scrolled.
    pub fn capture(viewport: &dyn Viewport, record: Option<usize>) -> Self {
        let metrics = viewport.metrics();
        let pinned = record
            .and_then(|record| viewport.locate_record(record).map(|row| PinnedRow { record, row }));
        Self { scroll_height: metrics.scroll_height, scroll_top: metrics.scroll_top, pinned }
    }

    /// Scroll offset that keeps the previously visible rows in place once the
    /// viewport reflects the new window.
    ///
    /// Uses the pinned record's row movement when it can still be located,
    /// and the change in total height otherwise.
    pub fn compensated(&self, viewport: &dyn Viewport) -> usize {
        if let Some(pin) = self.pinned
            && let Some(row) = viewport.locate_record(pin.record)
        {
            return shift(self.scroll_top, pin.row, row);
        }
        shift(self.scroll_top, self.scroll_height, viewport.metrics().scroll_height)
    }
}

/// `base + (after - before)`, saturating at zero.
fn shift(base: usize, before: usize, after: usize) -> usize {
    if after >= before { base.saturating_add(after - before) } else { base.saturating_sub(before - after) }
}
