//! Construction system — the ECS counterpart of `sim::ConstructionSystem`.

use bevy_ecs::entity::Entity;
use bevy_ecs::message::MessageWriter;
use bevy_ecs::query::With;
use bevy_ecs::system::{Query, Res, ResMut};
use tracing::{debug, warn};

use crate::ecs::clock::SimClock;
use crate::ecs::components::{Building, LocatedIn, SettlementCore, SimEntity, SiteState};
use crate::ecs::messages::SiteMessage;
use crate::ecs::resources::{EcsIdGenerator, EventLog};
use crate::model::{EventKind, Resource};
use crate::sim::HAUL_PER_DAY;

/// Daily system: moves construction material from settlement stockpiles onto
/// incomplete sites, flipping sites usable when the last requirement lands.
pub fn deliver_to_sites(
    clock: Res<SimClock>,
    mut id_gen: ResMut<EcsIdGenerator>,
    mut log: ResMut<EventLog>,
    mut settlements: Query<&mut SettlementCore>,
    mut sites: Query<(Entity, &SimEntity, &mut SiteState, &LocatedIn), With<Building>>,
    mut out: MessageWriter<SiteMessage>,
) {
    let time = clock.time;
    let mut day_event: Option<u64> = None;

    for (building, sim, mut state, located) in sites.iter_mut() {
        if state.is_complete() {
            continue;
        }
        let Ok(mut core) = settlements.get_mut(located.0) else {
            warn!(building_id = sim.id, "site is located in a non-settlement entity");
            continue;
        };

        let blueprint = state.kind.blueprint();
        for resource in Resource::CONSTRUCTION {
            let remaining = state.site.remaining(blueprint, resource);
            let stock = core.stockpile.amount(resource);
            let amount = remaining.min(stock).min(HAUL_PER_DAY);
            if amount == 0 {
                continue;
            }

            let event_id = *day_event.get_or_insert_with(|| {
                log.push(
                    &mut *id_gen,
                    EventKind::ResourcesDelivered,
                    time,
                    format!("Construction hauling on {time}"),
                    None,
                )
            });

            if let Err(e) = core.stockpile.debit(resource, amount) {
                warn!(building_id = sim.id, %resource, "stockpile debit failed: {e}");
                continue;
            }
            if let Err(e) = state.site.deliver(blueprint, resource, amount) {
                warn!(building_id = sim.id, %resource, "delivery rejected: {e}");
                continue;
            }

            out.write(SiteMessage::ResourcesDelivered {
                event_id,
                building,
                settlement: located.0,
                resource,
                amount,
            });
        }

        if state.is_complete() {
            let cause = day_event.expect("completion requires at least one delivery");
            let event_id = log.push(
                &mut *id_gen,
                EventKind::ConstructionCompleted,
                time,
                format!("{} finished construction on {time}", sim.name),
                Some(cause),
            );
            debug!(building_id = sim.id, kind = state.kind.label(), "construction completed");
            out.write(SiteMessage::ConstructionCompleted {
                event_id,
                building,
                settlement: located.0,
                kind: state.kind,
            });
        }
    }
}
