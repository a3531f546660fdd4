use hamlet::model::*;
use hamlet::scenario::Scenario;

/// A small deterministic world: one settlement, two buildings, a delivery,
/// and a crew assignment.
///
/// Record counts (asserted by the round-trip tests):
/// 1 settlement, 2 buildings, 3 events, 5 event effects.
pub fn build_test_world() -> World {
    let mut s = Scenario::at_year(100);
    let sett = s
        .settlement("Ashford")
        .stockpile(Resource::Stone, 40)
        .stockpile(Resource::Wood, 60)
        .stockpile(Resource::Iron, 10)
        .laborers(25)
        .id();
    let mine = s.add_building(BuildingKind::CoalMine, sett);
    s.add_building(BuildingKind::Barn, sett);
    let mut world = s.build();

    let delivery = world.add_event(
        EventKind::ResourcesDelivered,
        world.current_time,
        "Stone hauled to the mine".to_string(),
    );
    world
        .deliver_to_building(mine, Resource::Stone, 5, delivery)
        .unwrap();

    let muster = world.add_event(
        EventKind::WorkersAssigned,
        world.current_time,
        "Crew mustered at the mine".to_string(),
    );
    world.assign_workers(mine, 2, muster).unwrap();

    world
}

#[allow(dead_code)]
pub fn read_lines(path: &std::path::Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}
