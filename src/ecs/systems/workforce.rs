//! Workforce system — the ECS counterpart of `sim::WorkforceSystem`.

use bevy_ecs::entity::Entity;
use bevy_ecs::message::MessageWriter;
use bevy_ecs::query::With;
use bevy_ecs::system::{Query, Res, ResMut};
use tracing::warn;

use crate::ecs::clock::SimClock;
use crate::ecs::components::{Building, LocatedIn, SettlementCore, SimEntity, SiteState};
use crate::ecs::messages::SiteMessage;
use crate::ecs::resources::{EcsIdGenerator, EventLog};
use crate::model::EventKind;

/// Daily system: staffs usable workplaces from the settlement labor pool and
/// recalls crews from buildings that stopped being usable.
///
/// Iteration follows query order, which tracks spawn order here, so older
/// buildings fill before newer ones when labor is scarce.
pub fn staff_workplaces(
    clock: Res<SimClock>,
    mut id_gen: ResMut<EcsIdGenerator>,
    mut log: ResMut<EventLog>,
    mut settlements: Query<&mut SettlementCore>,
    mut sites: Query<(Entity, &SimEntity, &mut SiteState, &LocatedIn), With<Building>>,
    mut out: MessageWriter<SiteMessage>,
) {
    let time = clock.time;
    let mut recall_event: Option<u64> = None;
    let mut muster_event: Option<u64> = None;

    for (building, sim, mut state, located) in sites.iter_mut() {
        let Ok(mut core) = settlements.get_mut(located.0) else {
            continue;
        };
        let blueprint = state.kind.blueprint();

        if !state.site.usable && state.site.workers > 0 {
            let count = state.site.workers;
            if let Err(e) = state.site.release_workers(count) {
                warn!(building_id = sim.id, "crew recall failed: {e}");
                continue;
            }
            core.laborers += count;
            let event_id = *recall_event.get_or_insert_with(|| {
                log.push(
                    &mut *id_gen,
                    EventKind::WorkersReleased,
                    time,
                    format!("Crews recalled on {time}"),
                    None,
                )
            });
            out.write(SiteMessage::WorkersReleased {
                event_id,
                building,
                count,
            });
            continue;
        }

        if !state.site.usable || state.site.workers >= blueprint.max_workers {
            continue;
        }

        let hire = core.laborers.min(blueprint.max_workers - state.site.workers);
        if hire == 0 {
            continue;
        }
        if let Err(e) = state.site.assign_workers(blueprint, hire) {
            warn!(building_id = sim.id, hire, "staffing failed: {e}");
            continue;
        }
        core.laborers -= hire;
        let event_id = *muster_event.get_or_insert_with(|| {
            log.push(
                &mut *id_gen,
                EventKind::WorkersAssigned,
                time,
                format!("Work crews mustered on {time}"),
                None,
            )
        });
        out.write(SiteMessage::WorkersAssigned {
            event_id,
            building,
            count: hire,
        });
    }
}
