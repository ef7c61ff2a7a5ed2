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

//! Local-day bucketing of message timestamps and date-jump resolution.
//!
//! The window controller only repositions around an ordinal; turning a date
//! or timestamp into that ordinal happens here, against the same source the
//! controller holds.

use chrono::{DateTime, NaiveDate, TimeZone};
use std::collections::BTreeMap;

/// Anything with a millisecond Unix timestamp.
pub trait Timestamped {
    fn timestamp_ms(&self) -> i64;
}

impl Timestamped for i64 {
    fn timestamp_ms(&self) -> i64 {
        *self
    }
}

/// Local calendar day of `timestamp_ms` in `tz`.
pub fn day_of<Tz: TimeZone>(timestamp_ms: i64, tz: &Tz) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(timestamp_ms).map(|utc| utc.with_timezone(tz).date_naive())
}

/// Index of the first record that falls on the same local day as
/// `timestamp_ms`.
pub fn first_index_on_day_of<M: Timestamped, Tz: TimeZone>(
    source: &[M],
    timestamp_ms: i64,
    tz: &Tz,
) -> Option<usize> {
    let day = day_of(timestamp_ms, tz)?;
    source.iter().position(|m| day_of(m.timestamp_ms(), tz) == Some(day))
}

/// First ordinal of every local day that has messages, for one source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayIndex {
    days: BTreeMap<NaiveDate, usize>,
}

impl DayIndex {
    pub fn build<M: Timestamped, Tz: TimeZone>(source: &[M], tz: &Tz) -> Self {
        let mut days = BTreeMap::new();
        for (index, record) in source.iter().enumerate() {
            if let Some(day) = day_of(record.timestamp_ms(), tz) {
                days.entry(day).or_insert(index);
            }
        }
        Self { days }
    }

    #[must_use]
    pub fn first_index_on(&self, day: NaiveDate) -> Option<usize> {
        self.days.get(&day).copied()
    }

    /// Closest earlier day that has messages.
    #[must_use]
    pub fn previous_day(&self, day: NaiveDate) -> Option<NaiveDate> {
        self.days.range(..day).next_back().map(|(d, _)| *d)
    }

    /// Closest later day that has messages.
    #[must_use]
    pub fn next_day(&self, day: NaiveDate) -> Option<NaiveDate> {
        use std::ops::Bound::{Excluded, Unbounded};
        self.days.range((Excluded(day), Unbounded)).next().map(|(d, _)| *d)
    }
}
