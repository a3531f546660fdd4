use tracing::{debug, warn};

use super::context::TickContext;
use super::signal::{Signal, SignalKind};
use super::system::{SimSystem, TickFrequency};
use crate::model::{EventKind, Resource};

/// Most material a settlement's haulers can move onto one site per resource
/// per day.
pub const HAUL_PER_DAY: u32 = 10;

/// Moves construction material from settlement stockpiles onto incomplete
/// sites, and flips sites usable when the last requirement lands.
///
/// Delivery amounts are clamped to what the site still requires, so the
/// strict `deliver` contract never rejects a planned haul.
pub struct ConstructionSystem;

impl SimSystem for ConstructionSystem {
    fn name(&self) -> &str {
        "construction"
    }

    fn frequency(&self) -> TickFrequency {
        TickFrequency::Daily
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        let time = ctx.world.current_time;

        let incomplete: Vec<u64> = ctx
            .world
            .buildings
            .values()
            .filter(|b| !b.is_complete())
            .map(|b| b.id)
            .collect();
        if incomplete.is_empty() {
            return;
        }

        // One umbrella event per day with any hauling; completions chain off it.
        let mut day_event: Option<u64> = None;

        for building_id in incomplete {
            let building = &ctx.world.buildings[&building_id];
            let settlement_id = building.settlement_id;
            let kind = building.kind;
            let name = building.name.clone();

            for resource in Resource::CONSTRUCTION {
                let remaining = ctx.world.buildings[&building_id].remaining(resource);
                if remaining == 0 {
                    continue;
                }
                let stock = ctx
                    .world
                    .settlement(settlement_id)
                    .map(|s| s.stockpile.amount(resource))
                    .unwrap_or(0);
                let amount = remaining.min(stock).min(HAUL_PER_DAY);
                if amount == 0 {
                    continue;
                }

                let event_id = *day_event.get_or_insert_with(|| {
                    ctx.world.add_event(
                        EventKind::ResourcesDelivered,
                        time,
                        format!("Construction hauling on {time}"),
                    )
                });

                if let Err(e) =
                    ctx.world
                        .debit_stockpile(settlement_id, resource, amount, event_id)
                {
                    warn!(settlement_id, %resource, amount, "stockpile debit failed: {e}");
                    continue;
                }
                if let Err(e) =
                    ctx.world
                        .deliver_to_building(building_id, resource, amount, event_id)
                {
                    // The haul was clamped to the remaining requirement, so
                    // a rejection here means the site changed under us.
                    warn!(building_id, %resource, amount, "delivery rejected: {e}");
                    continue;
                }

                ctx.signals.push(Signal {
                    event_id,
                    kind: SignalKind::ResourcesDelivered {
                        building_id,
                        settlement_id,
                        resource,
                        amount,
                    },
                });
            }

            if ctx.world.buildings[&building_id].is_complete() {
                let cause = day_event.expect("completion requires at least one delivery");
                let ev = ctx.world.add_caused_event(
                    EventKind::ConstructionCompleted,
                    time,
                    format!("{name} finished construction on {time}"),
                    cause,
                );
                debug!(building_id, kind = kind.label(), "construction completed");
                ctx.signals.push(Signal {
                    event_id: ev,
                    kind: SignalKind::ConstructionCompleted {
                        building_id,
                        settlement_id,
                        kind,
                    },
                });
            }
        }
    }
}
