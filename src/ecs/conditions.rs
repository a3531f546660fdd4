use bevy_ecs::system::Res;

use super::clock::SimClock;
use super::time::{HOURS_PER_MONTH, HOURS_PER_YEAR, SimTime};

// Internal check functions for testability.

fn yearly_check(time: SimTime) -> bool {
    time.as_hours().is_multiple_of(HOURS_PER_YEAR)
}

fn monthly_check(time: SimTime) -> bool {
    time.as_hours().is_multiple_of(HOURS_PER_MONTH)
}

fn daily_check(time: SimTime) -> bool {
    time.is_day_start()
}

// Bevy run condition functions (for use with `.run_if()`).

pub fn yearly(clock: Res<SimClock>) -> bool {
    yearly_check(clock.time)
}

pub fn monthly(clock: Res<SimClock>) -> bool {
    monthly_check(clock.time)
}

pub fn daily(clock: Res<SimClock>) -> bool {
    daily_check(clock.time)
}
