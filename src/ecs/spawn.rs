use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;

use super::clock::SimClock;
use super::components::{Building, LocatedIn, Settlement, SettlementCore, SimEntity, SiteState};
use super::resources::{EcsIdGenerator, EventLog};
use crate::model::{BuildingKind, EventKind};

/// Spawn a settlement entity and log its founding.
pub fn spawn_settlement(world: &mut World, name: &str, core: SettlementCore) -> Entity {
    let now = world.resource::<SimClock>().time;
    let id = world.resource_mut::<EcsIdGenerator>().0.next_id();
    let entity = world
        .spawn((
            SimEntity {
                id,
                name: name.to_string(),
                founded: now,
            },
            Settlement,
            core,
        ))
        .id();
    world.resource_scope::<EventLog, _>(|world, mut log| {
        let mut id_gen = world.resource_mut::<EcsIdGenerator>();
        log.push(
            &mut *id_gen,
            EventKind::SettlementFounded,
            now,
            format!("{name} founded"),
            None,
        );
    });
    entity
}

/// Spawn a planned building in a settlement and log the plan.
/// The site starts with zeroed deliveries, an empty crew, and `usable = false`.
pub fn spawn_building(
    world: &mut World,
    kind: BuildingKind,
    name: &str,
    settlement: Entity,
) -> Entity {
    let now = world.resource::<SimClock>().time;
    let id = world.resource_mut::<EcsIdGenerator>().0.next_id();
    let entity = world
        .spawn((
            SimEntity {
                id,
                name: name.to_string(),
                founded: now,
            },
            Building,
            SiteState::planned(kind),
            LocatedIn(settlement),
        ))
        .id();
    world.resource_scope::<EventLog, _>(|world, mut log| {
        let mut id_gen = world.resource_mut::<EcsIdGenerator>();
        log.push(
            &mut *id_gen,
            EventKind::BuildingPlanned,
            now,
            format!("{} planned: {name}", kind.label()),
            None,
        );
    });
    entity
}
