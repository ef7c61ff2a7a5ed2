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

use std::ops::Range;

/// Half-open range `[start, end)` of materialized records.
///
/// Fields are private; every constructor clamps so that
/// `start <= end <= total` holds for the source length it was built against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Window {
    start: usize,
    end: usize,
}

impl Window {
    #[must_use]
    pub const fn empty() -> Self {
        Self { start: 0, end: 0 }
    }

    /// Build a window clamped to a source of `total` records.
    #[must_use]
    pub fn clamped(start: usize, end: usize, total: usize) -> Self {
        let end = end.min(total);
        let start = start.min(end);
        Self { start, end }
    }

    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }

    #[must_use]
    pub fn has_older(&self) -> bool {
        self.start > 0
    }

    #[must_use]
    pub fn has_newer(&self, total: usize) -> bool {
        self.end < total
    }

    /// Re-clamp against a (possibly shorter) source.
    #[must_use]
    pub fn clamp_to(self, total: usize) -> Self {
        Self::clamped(self.start, self.end, total)
    }

    /// Records present in both windows whose predecessor is present in both
    /// as well. A record's rows can depend on the record before it (grouping,
    /// day breaks), so only these are laid out identically in both.
    #[must_use]
    pub fn settled_overlap(&self, other: &Self) -> Option<Self> {
        let start = self.start.max(other.start).saturating_add(1);
        let end = self.end.min(other.end);
        (start < end).then_some(Self { start, end })
    }
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
