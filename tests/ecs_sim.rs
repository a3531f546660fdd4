use hamlet::ecs::components::{SettlementCore, SiteState};
use hamlet::ecs::resources::EventLog;
use hamlet::ecs::spawn::{spawn_building, spawn_settlement};
use hamlet::ecs::systems::{DisasterPolicyRes, DisasterQueue};
use hamlet::ecs::time::HOURS_PER_DAY;
use hamlet::ecs::{SimTick, build_sim_app_seeded};
use hamlet::model::{
    BuildingKind, DisasterOutcome, DisasterPolicy, EventKind, Resource, ResourceLedger, Workplace,
};

fn stocked_core() -> SettlementCore {
    SettlementCore {
        stockpile: ResourceLedger::new()
            .with(Resource::Stone, 100)
            .with(Resource::Wood, 100)
            .with(Resource::Iron, 100),
        laborers: 20,
    }
}

#[test]
fn construction_completes_and_staffs_over_ticks() {
    let mut app = build_sim_app_seeded(100, 7);

    let world = app.world_mut();
    let sett = spawn_settlement(world, "Ashford", stocked_core());
    let mine = spawn_building(world, BuildingKind::CoalMine, "Ashford Coal Mine", sett);

    // Two days of hourly ticks: day 1 delivers all 10/10/10 and staffs.
    for _ in 0..(HOURS_PER_DAY * 2) {
        app.world_mut().run_schedule(SimTick);
    }

    let state = app.world().get::<SiteState>(mine).unwrap();
    assert!(state.is_complete());
    assert!(state.site.usable);
    assert_eq!(state.site.workers, 20);

    let core = app.world().get::<SettlementCore>(sett).unwrap();
    assert_eq!(core.laborers, 0);
    assert_eq!(core.stockpile.amount(Resource::Stone), 90);

    let log = app.world().resource::<EventLog>();
    assert!(
        log.events
            .iter()
            .any(|e| e.kind == EventKind::ConstructionCompleted)
    );
    // Completion chains off the day's hauling event.
    let completion = log
        .events
        .iter()
        .find(|e| e.kind == EventKind::ConstructionCompleted)
        .unwrap();
    let cause = completion.caused_by.unwrap();
    assert!(
        log.events
            .iter()
            .any(|e| e.id == cause && e.kind == EventKind::ResourcesDelivered)
    );
}

#[test]
fn multi_day_quarry_respects_haul_limit() {
    let mut app = build_sim_app_seeded(100, 7);

    let world = app.world_mut();
    let sett = spawn_settlement(world, "Ashford", stocked_core());
    let quarry = spawn_building(world, BuildingKind::Quarry, "Ashford Quarry", sett);

    // One day: at most 10 of each resource moves.
    for _ in 0..HOURS_PER_DAY {
        app.world_mut().run_schedule(SimTick);
    }
    let state = app.world().get::<SiteState>(quarry).unwrap();
    assert_eq!(state.site.delivered.amount(Resource::Stone), 10);
    assert!(!state.site.usable);

    // Three more days finish the 40/40 requirement.
    for _ in 0..(HOURS_PER_DAY * 3) {
        app.world_mut().run_schedule(SimTick);
    }
    let state = app.world().get::<SiteState>(quarry).unwrap();
    assert!(state.site.usable);
}

#[test]
fn queued_disaster_with_default_policy_changes_nothing() {
    let mut app = build_sim_app_seeded(100, 7);

    let world = app.world_mut();
    let sett = spawn_settlement(world, "Ashford", stocked_core());
    let mine = spawn_building(world, BuildingKind::CoalMine, "Ashford Coal Mine", sett);

    // Let construction finish and crews arrive.
    for _ in 0..HOURS_PER_DAY {
        app.world_mut().run_schedule(SimTick);
    }
    let before = app.world().get::<SiteState>(mine).unwrap().site.clone();

    app.world_mut().resource_mut::<DisasterQueue>().0.push(mine);
    app.world_mut().run_schedule(SimTick);

    let after = &app.world().get::<SiteState>(mine).unwrap().site;
    assert_eq!(after, &before);
    // The strike is still logged, even though nothing changed.
    let log = app.world().resource::<EventLog>();
    assert_eq!(
        log.events
            .iter()
            .filter(|e| e.kind == EventKind::Disaster)
            .count(),
        1
    );
}

#[test]
fn queued_disaster_with_custom_policy_applies_and_crews_recalled() {
    struct CaveIn;
    impl DisasterPolicy for CaveIn {
        fn strike(&self, _kind: BuildingKind, site: &mut Workplace) -> DisasterOutcome {
            let lost = site.workers.min(4);
            site.workers -= lost;
            site.usable = false;
            DisasterOutcome::Struck {
                workers_lost: lost,
                usability_revoked: true,
            }
        }
    }

    let mut app = build_sim_app_seeded(100, 7);
    app.insert_resource(DisasterPolicyRes(Box::new(CaveIn)));

    let world = app.world_mut();
    let sett = spawn_settlement(world, "Ashford", stocked_core());
    let mine = spawn_building(world, BuildingKind::CoalMine, "Ashford Coal Mine", sett);

    for _ in 0..HOURS_PER_DAY {
        app.world_mut().run_schedule(SimTick);
    }
    assert_eq!(app.world().get::<SiteState>(mine).unwrap().site.workers, 20);

    app.world_mut().resource_mut::<DisasterQueue>().0.push(mine);
    // The strike lands this tick; the next daily staffing sweep (one more
    // day boundary) recalls the surviving crew of the now-unusable mine.
    for _ in 0..(HOURS_PER_DAY + 1) {
        app.world_mut().run_schedule(SimTick);
    }

    let state = app.world().get::<SiteState>(mine).unwrap();
    assert!(!state.site.usable);
    assert_eq!(state.site.workers, 0);
    let core = app.world().get::<SettlementCore>(sett).unwrap();
    // 20 staffed - 4 lost to the cave-in; 16 recalled to the pool.
    assert_eq!(core.laborers, 16);

    let log = app.world().resource::<EventLog>();
    assert!(log.events.iter().any(|e| e.kind == EventKind::Disaster));
    assert!(
        log.events
            .iter()
            .any(|e| e.kind == EventKind::WorkersReleased)
    );
}
