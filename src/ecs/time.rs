use std::fmt;

// Same 360-day calendar as `model::SimTimestamp`, at hour resolution.
pub const HOURS_PER_DAY: u32 = 24;
pub const DAYS_PER_MONTH: u32 = 30;
pub const MONTHS_PER_YEAR: u32 = 12;
pub const DAYS_PER_YEAR: u32 = 360;

pub const HOURS_PER_MONTH: u32 = HOURS_PER_DAY * DAYS_PER_MONTH; // 720
pub const HOURS_PER_YEAR: u32 = HOURS_PER_DAY * DAYS_PER_YEAR; // 8,640

/// Simulation time as total elapsed hours since year 0.
///
/// A plain `u32` wrapper — no bit packing, just hours. All calendar
/// accessors (year, month, day, hour) are derived via division/modulo.
/// Natural `u32` ordering equals chronological ordering.
///
/// Max representable: ~497,000 years (`u32::MAX / HOURS_PER_YEAR`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SimTime(u32);

impl SimTime {
    /// Create from a raw hour count.
    pub fn from_hours(hours: u32) -> Self {
        Self(hours)
    }

    /// Start of a year (day 1, hour 0).
    pub fn from_year(year: u32) -> Self {
        Self(year * HOURS_PER_YEAR)
    }

    /// Full specification: year, day-of-year (1–360), hour (0–23).
    pub fn new(year: u32, day: u32, hour: u32) -> Self {
        debug_assert!(
            (1..=DAYS_PER_YEAR).contains(&day),
            "day out of range: {day}"
        );
        debug_assert!(hour < HOURS_PER_DAY, "hour out of range: {hour}");
        Self(year * HOURS_PER_YEAR + (day - 1) * HOURS_PER_DAY + hour)
    }

    /// The inner hour count.
    pub fn as_hours(self) -> u32 {
        self.0
    }

    pub fn year(self) -> u32 {
        self.0 / HOURS_PER_YEAR
    }

    /// Day of year (1–360).
    pub fn day(self) -> u32 {
        (self.0 % HOURS_PER_YEAR) / HOURS_PER_DAY + 1
    }

    /// Month of year (1–12).
    pub fn month(self) -> u32 {
        (self.day() - 1) / DAYS_PER_MONTH + 1
    }

    /// Day within the month (1–30).
    pub fn day_of_month(self) -> u32 {
        (self.day() - 1) % DAYS_PER_MONTH + 1
    }

    /// Hour of day (0–23).
    pub fn hour(self) -> u32 {
        self.0 % HOURS_PER_DAY
    }

    /// True at the first hour of a year.
    pub fn is_year_start(self) -> bool {
        self.0.is_multiple_of(HOURS_PER_YEAR)
    }

    /// True at the first hour of a month.
    pub fn is_month_start(self) -> bool {
        self.0.is_multiple_of(HOURS_PER_MONTH)
    }

    /// True at the first hour of a day.
    pub fn is_day_start(self) -> bool {
        self.0.is_multiple_of(HOURS_PER_DAY)
    }

    /// The day-resolution model timestamp for this time.
    pub fn timestamp(self) -> crate::model::SimTimestamp {
        crate::model::SimTimestamp::new(self.year(), self.day())
    }
}

impl Default for SimTime {
    fn default() -> Self {
        Self::from_year(0)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Y{}.D{}.H{}", self.year(), self.day(), self.hour())
    }
}
