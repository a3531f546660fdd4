use tracing::warn;

use super::context::TickContext;
use super::signal::{Signal, SignalKind};
use super::system::{SimSystem, TickFrequency};
use crate::model::{DisasterOutcome, EventKind};

/// Staffs usable workplaces from the settlement labor pool and recalls crews
/// from buildings that stopped being usable.
///
/// Staffing is first-fit in building-ID order, so older buildings fill
/// before newer ones when labor is scarce.
pub struct WorkforceSystem;

impl SimSystem for WorkforceSystem {
    fn name(&self) -> &str {
        "workforce"
    }

    fn frequency(&self) -> TickFrequency {
        TickFrequency::Daily
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        let time = ctx.world.current_time;
        let mut recall_event: Option<u64> = None;
        let mut muster_event: Option<u64> = None;

        let building_ids: Vec<u64> = ctx.world.buildings.keys().copied().collect();

        for building_id in building_ids {
            let building = &ctx.world.buildings[&building_id];
            let settlement_id = building.settlement_id;
            let usable = building.site.usable;
            let workers = building.site.workers;
            let capacity = building.blueprint().max_workers;

            if !usable && workers > 0 {
                // Crew of a building that lost usability returns to the pool.
                let event_id = *recall_event.get_or_insert_with(|| {
                    ctx.world.add_event(
                        EventKind::WorkersReleased,
                        time,
                        format!("Crews recalled on {time}"),
                    )
                });
                if let Err(e) = ctx.world.release_workers(building_id, workers, event_id) {
                    warn!(building_id, workers, "crew recall failed: {e}");
                    continue;
                }
                ctx.signals.push(Signal {
                    event_id,
                    kind: SignalKind::WorkersReleased {
                        building_id,
                        count: workers,
                    },
                });
                continue;
            }

            if !usable || workers >= capacity {
                continue;
            }

            let idle = ctx
                .world
                .settlement(settlement_id)
                .map(|s| s.laborers)
                .unwrap_or(0);
            let hire = idle.min(capacity - workers);
            if hire == 0 {
                continue;
            }

            let event_id = *muster_event.get_or_insert_with(|| {
                ctx.world.add_event(
                    EventKind::WorkersAssigned,
                    time,
                    format!("Work crews mustered on {time}"),
                )
            });
            if let Err(e) = ctx.world.assign_workers(building_id, hire, event_id) {
                warn!(building_id, hire, "staffing failed: {e}");
                continue;
            }
            ctx.signals.push(Signal {
                event_id,
                kind: SignalKind::WorkersAssigned {
                    building_id,
                    count: hire,
                },
            });
        }
    }

    /// Recall crews the moment a disaster revokes usability instead of
    /// waiting for the next daily sweep.
    fn handle_signals(&mut self, ctx: &mut TickContext) {
        let time = ctx.world.current_time;
        let recalls: Vec<(u64, u64, u32)> = ctx
            .inbox
            .iter()
            .filter_map(|signal| match &signal.kind {
                SignalKind::DisasterStruck {
                    building_id,
                    outcome:
                        DisasterOutcome::Struck {
                            usability_revoked: true,
                            ..
                        },
                } => {
                    let building = ctx.world.buildings.get(building_id)?;
                    (building.site.workers > 0)
                        .then(|| (signal.event_id, *building_id, building.site.workers))
                }
                _ => None,
            })
            .collect();

        for (cause, building_id, workers) in recalls {
            let name = ctx
                .world
                .building(building_id)
                .map(|b| b.name.clone())
                .unwrap_or_default();
            let ev = ctx.world.add_caused_event(
                EventKind::WorkersReleased,
                time,
                format!("{name} evacuated after disaster"),
                cause,
            );
            if let Err(e) = ctx.world.release_workers(building_id, workers, ev) {
                warn!(building_id, workers, "evacuation failed: {e}");
                continue;
            }
            ctx.signals.push(Signal {
                event_id: ev,
                kind: SignalKind::WorkersReleased {
                    building_id,
                    count: workers,
                },
            });
        }
    }
}
