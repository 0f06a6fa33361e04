//! Time-of-day buckets and the hour table that assigns them.
//!
//! The table is an ordered list of disjoint, right-inclusive hour ranges that
//! together cover `0..=23`. Hours outside every bucket have an explicit `None`
//! row, so an hour never falls through to a default.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Part of the day a record can be flagged for.
///
/// The variant name is also the spreadsheet column holding the flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeBucket {
    Morning,
    Afternoon,
    Evening,
    Night,
}

/// Hour ranges in the reference time zone, in ascending order.
pub const HOUR_TABLE: &[(RangeInclusive<u32>, Option<TimeBucket>)] = &[
    (0..=9, None),
    (10..=12, Some(TimeBucket::Morning)),
    (13..=18, Some(TimeBucket::Afternoon)),
    (19..=21, Some(TimeBucket::Evening)),
    (22..=22, Some(TimeBucket::Night)),
    (23..=23, None),
];

impl TimeBucket {
    pub const ALL: [Self; 4] = [Self::Morning, Self::Afternoon, Self::Evening, Self::Night];

    /// Bucket for an hour of the day, or `None` when no bucket applies.
    ///
    /// Hours above 23 are not valid clock hours and also return `None`.
    #[must_use]
    pub fn from_hour(hour: u32) -> Option<Self> {
        HOUR_TABLE
            .iter()
            .find(|(range, _)| range.contains(&hour))
            .and_then(|(_, bucket)| *bucket)
    }

    /// Spreadsheet column holding this bucket's flag.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
            Self::Evening => "Evening",
            Self::Night => "Night",
        }
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}
