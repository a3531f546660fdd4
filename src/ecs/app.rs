use bevy_app::App;
use bevy_ecs::message::MessageRegistry;
use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::clock::SimClock;
use super::conditions::daily;
use super::messages::SiteMessage;
use super::resources::{
    ConstructionRng, DisasterRng, EcsIdGenerator, EventLog, SimRng, WorkforceRng, distribute_rng,
};
use super::schedule::{DomainSet, SimPhase, configure_sim_schedule};
use super::systems::{
    DisasterPolicyRes, DisasterQueue, apply_disasters, deliver_to_sites, staff_workplaces,
};

/// Build a headless Bevy app with the simulation clock, core resources,
/// message types, and the site systems.
///
/// Manual tick control:
/// ```no_run
/// # use hamlet::ecs::{build_sim_app, SimTick};
/// let mut app = build_sim_app(100);
/// for _ in 0..8_640 {  // 1 year of hourly ticks
///     app.world_mut().run_schedule(SimTick);
/// }
/// ```
pub fn build_sim_app(start_year: u32) -> App {
    build_sim_app_seeded(start_year, 42)
}

/// Build a headless Bevy app with a specific RNG seed.
pub fn build_sim_app_seeded(start_year: u32, seed: u64) -> App {
    build_sim_app_with_executor(start_year, seed, ExecutorKind::SingleThreaded)
}

/// Build a headless Bevy app with a specific executor kind.
pub fn build_sim_app_with_executor(start_year: u32, seed: u64, executor: ExecutorKind) -> App {
    let mut app = App::empty();

    // Core resources
    app.insert_resource(SimClock::new(start_year));
    app.insert_resource(EventLog::new());
    app.insert_resource(EcsIdGenerator::default());
    app.insert_resource(SimRng {
        rng: SmallRng::seed_from_u64(seed),
        seed,
    });
    app.init_resource::<ConstructionRng>();
    app.init_resource::<WorkforceRng>();
    app.init_resource::<DisasterRng>();
    app.init_resource::<DisasterQueue>();
    app.init_resource::<DisasterPolicyRes>();

    // Register message types
    MessageRegistry::register_message::<SiteMessage>(app.world_mut());

    // Build schedule with message rotation + RNG distribution + site systems
    let mut schedule = configure_sim_schedule(executor);
    schedule.add_systems(bevy_ecs::message::message_update_system.in_set(SimPhase::PreUpdate));
    schedule.add_systems(distribute_rng.in_set(SimPhase::PreUpdate));
    schedule.add_systems(
        deliver_to_sites
            .run_if(daily)
            .in_set(DomainSet::Construction),
    );
    schedule.add_systems(
        staff_workplaces
            .run_if(daily)
            .in_set(DomainSet::Workforce),
    );
    schedule.add_systems(apply_disasters.in_set(SimPhase::Reactions));
    app.add_schedule(schedule);
    app
}
