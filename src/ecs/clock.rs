use bevy_ecs::resource::Resource;
use bevy_ecs::system::ResMut;

use super::time::SimTime;

/// Simulation clock resource tracking the current time and tick count.
///
/// Advances by one hour per tick. The `advance_clock` system moves the clock
/// forward at the end of each tick (in `SimPhase::Last`), so systems see the
/// current time before it advances.
#[derive(Resource)]
pub struct SimClock {
    pub time: SimTime,
    pub tick_count: u64,
}

impl SimClock {
    pub fn new(start_year: u32) -> Self {
        Self {
            time: SimTime::from_year(start_year),
            tick_count: 0,
        }
    }

    /// Advance the clock by one hour.
    pub fn advance(&mut self) {
        self.time = SimTime::from_hours(self.time.as_hours() + 1);
        self.tick_count += 1;
    }
}

/// Bevy system that advances the simulation clock by one hour.
pub fn advance_clock(mut clock: ResMut<SimClock>) {
    clock.advance();
}
