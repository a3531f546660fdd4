use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::model::{Building, Event, EventKind, Settlement, SimTimestamp, World};
use crate::sim::{Signal, SignalKind, SimConfig, SimSystem, TickContext, run};

// ---------------------------------------------------------------------------
// Tick execution helpers
// ---------------------------------------------------------------------------

/// Run a single system tick at the start of the given year. Returns emitted signals.
pub fn tick_system(
    world: &mut World,
    system: &mut dyn SimSystem,
    year: u32,
    seed: u64,
) -> Vec<Signal> {
    tick_system_at(world, system, SimTimestamp::from_year(year), seed)
}

/// Run a single system tick at a specific timestamp. Returns emitted signals.
pub fn tick_system_at(
    world: &mut World,
    system: &mut dyn SimSystem,
    time: SimTimestamp,
    seed: u64,
) -> Vec<Signal> {
    world.current_time = time;
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut signals = Vec::new();
    let mut ctx = TickContext {
        world,
        rng: &mut rng,
        signals: &mut signals,
        inbox: &[],
    };
    system.tick(&mut ctx);
    signals
}

/// Run a system's handle_signals with the given inbox. Returns newly emitted signals.
pub fn deliver_signals(
    world: &mut World,
    system: &mut dyn SimSystem,
    inbox: &[Signal],
    seed: u64,
) -> Vec<Signal> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut signals = Vec::new();
    let mut ctx = TickContext {
        world,
        rng: &mut rng,
        signals: &mut signals,
        inbox,
    };
    system.handle_signals(&mut ctx);
    signals
}

/// Run a full tick + handle_signals cycle for a single system. Returns all signals.
pub fn full_tick(
    world: &mut World,
    system: &mut dyn SimSystem,
    year: u32,
    seed: u64,
) -> Vec<Signal> {
    let tick_signals = tick_system(world, system, year, seed);
    if tick_signals.is_empty() {
        return tick_signals;
    }
    let reaction_signals = deliver_signals(world, system, &tick_signals, seed);
    let mut all = tick_signals;
    all.extend(reaction_signals);
    all
}

/// Run multiple years using the standard simulation loop.
pub fn run_years(world: &mut World, systems: &mut [Box<dyn SimSystem>], num_years: u32, seed: u64) {
    let start_year = world.current_time.year();
    run(world, systems, SimConfig::new(start_year, num_years, seed))
        .expect("simulation flush failed");
}

// ---------------------------------------------------------------------------
// Query helpers
// ---------------------------------------------------------------------------

/// Get a building, panicking with context if it is missing.
pub fn get_building(world: &World, id: u64) -> &Building {
    world
        .buildings
        .get(&id)
        .unwrap_or_else(|| panic!("get_building: building {id} not found"))
}

/// Get a settlement, panicking with context if it is missing.
pub fn get_settlement(world: &World, id: u64) -> &Settlement {
    world
        .settlements
        .get(&id)
        .unwrap_or_else(|| panic!("get_settlement: settlement {id} not found"))
}

/// Count events of a given kind.
pub fn count_events(world: &World, kind: &EventKind) -> usize {
    world.events.values().filter(|e| e.kind == *kind).count()
}

/// Find all events of a given kind.
pub fn events_of_kind<'a>(world: &'a World, kind: &EventKind) -> Vec<&'a Event> {
    world.events.values().filter(|e| e.kind == *kind).collect()
}

// ---------------------------------------------------------------------------
// Signal helpers
// ---------------------------------------------------------------------------

/// Check if any signal matches the predicate.
pub fn has_signal(signals: &[Signal], predicate: impl Fn(&SignalKind) -> bool) -> bool {
    signals.iter().any(|s| predicate(&s.kind))
}

/// Count signals matching the predicate.
pub fn count_signals(signals: &[Signal], predicate: impl Fn(&SignalKind) -> bool) -> usize {
    signals.iter().filter(|s| predicate(&s.kind)).count()
}

// ---------------------------------------------------------------------------
// Assertion helpers
// ---------------------------------------------------------------------------

/// Assert two worlds produced from the same seed are structurally identical.
/// Checks settlement, building, event, and effect counts.
pub fn assert_deterministic(world1: &World, world2: &World) {
    assert_eq!(
        world1.settlements.len(),
        world2.settlements.len(),
        "settlement count mismatch"
    );
    assert_eq!(
        world1.buildings.len(),
        world2.buildings.len(),
        "building count mismatch"
    );
    assert_eq!(
        world1.events.len(),
        world2.events.len(),
        "event count mismatch"
    );
    assert_eq!(
        world1.event_effects.len(),
        world2.event_effects.len(),
        "event_effects count mismatch"
    );
}
