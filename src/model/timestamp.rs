use std::fmt;

use serde::{Deserialize, Serialize};

const DAY_BITS: u32 = 9;
const YEAR_SHIFT: u32 = DAY_BITS;
const DAY_MASK: u32 = (1 << DAY_BITS) - 1;

pub const DAYS_PER_YEAR: u32 = 360;
pub const MONTHS_PER_YEAR: u32 = 12;
pub const DAYS_PER_MONTH: u32 = 30;

/// Compact simulation timestamp encoding year/day-of-year in a single `u32`.
///
/// Bit layout: `[year:23][day_of_year:9]`
/// - bits 9-31: year (0–8,388,607)
/// - bits 0-8:  day  (1–360)
///
/// Natural `u32` ordering equals chronological ordering. Day resolution is
/// enough for the tick granularities the simulation runs at.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "TimestampRepr", from = "TimestampRepr")]
pub struct SimTimestamp(u32);

#[derive(Serialize, Deserialize)]
struct TimestampRepr {
    year: u32,
    day: u32,
}

impl From<SimTimestamp> for TimestampRepr {
    fn from(ts: SimTimestamp) -> Self {
        TimestampRepr {
            year: ts.year(),
            day: ts.day(),
        }
    }
}

impl From<TimestampRepr> for SimTimestamp {
    fn from(repr: TimestampRepr) -> Self {
        SimTimestamp::new(repr.year, repr.day)
    }
}

impl SimTimestamp {
    /// Create a timestamp from year and day-of-year (1–360).
    pub fn new(year: u32, day: u32) -> Self {
        assert!(
            (1..=DAYS_PER_YEAR).contains(&day),
            "day out of range: {day}"
        );
        Self((year << YEAR_SHIFT) | day)
    }

    /// Create a timestamp for the start of a year (day 1).
    pub fn from_year(year: u32) -> Self {
        Self::new(year, 1)
    }

    /// Create a timestamp for the first day of a month (1–12).
    pub fn from_year_month(year: u32, month: u32) -> Self {
        debug_assert!(
            (1..=MONTHS_PER_YEAR).contains(&month),
            "month out of range: {month}"
        );
        Self::new(year, (month - 1) * DAYS_PER_MONTH + 1)
    }

    pub fn year(self) -> u32 {
        self.0 >> YEAR_SHIFT
    }

    /// Day of year (1–360).
    pub fn day(self) -> u32 {
        self.0 & DAY_MASK
    }

    /// Month of year (1–12), derived from day.
    pub fn month(self) -> u32 {
        (self.day() - 1) / DAYS_PER_MONTH + 1
    }

    /// Day within the month (1–30).
    pub fn day_of_month(self) -> u32 {
        (self.day() - 1) % DAYS_PER_MONTH + 1
    }
}

impl Default for SimTimestamp {
    fn default() -> Self {
        Self::from_year(0)
    }
}

impl fmt::Display for SimTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Y{}.D{}", self.year(), self.day())
    }
}
