use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs, Schedule, ScheduleLabel, SystemSet};

use super::clock::advance_clock;

/// Schedule label for the main simulation tick.
/// Run manually each tick via `app.world_mut().run_schedule(SimTick)`.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimTick;

/// Ordered phases within each simulation tick.
///
/// Systems are assigned to phases via `.in_set(SimPhase::Update)` etc.
/// Phases run in declaration order: PreUpdate < Update < Reactions < Last.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimPhase {
    PreUpdate,
    Update,
    Reactions,
    Last,
}

/// Per-domain system sets within `SimPhase::Update`.
///
/// Cross-domain ordering: `Construction → Workforce`. Construction flips
/// sites usable, and staffing the same tick keeps finished buildings from
/// idling a day.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum DomainSet {
    Construction,
    Workforce,
}

fn configure_domain_ordering(schedule: &mut Schedule) {
    schedule.configure_sets(DomainSet::Construction.in_set(SimPhase::Update));
    schedule.configure_sets(DomainSet::Workforce.in_set(SimPhase::Update));
    schedule.configure_sets(DomainSet::Workforce.after(DomainSet::Construction));
}

/// Build a configured `SimTick` schedule with phase ordering.
pub fn configure_sim_schedule(executor: ExecutorKind) -> Schedule {
    let mut schedule = Schedule::new(SimTick);
    schedule.set_executor_kind(executor);
    schedule.configure_sets(
        (
            SimPhase::PreUpdate,
            SimPhase::Update,
            SimPhase::Reactions,
            SimPhase::Last,
        )
            .chain(),
    );
    configure_domain_ordering(&mut schedule);
    schedule.add_systems(advance_clock.in_set(SimPhase::Last));
    schedule
}
