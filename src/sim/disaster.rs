use rand::RngCore;
use tracing::debug;

use super::context::TickContext;
use super::signal::{Signal, SignalKind};
use super::system::{SimSystem, TickFrequency};
use crate::model::{Building, DisasterPolicy, EventKind, SimTimestamp, Unscathed};

/// Decides which buildings a disaster hits on a given tick.
///
/// Supplied by the broader simulation; the crate ships no trigger of its own.
pub type DisasterTrigger =
    Box<dyn Fn(&Building, SimTimestamp, &mut dyn RngCore) -> bool + Send + Sync>;

/// Invokes the disaster hook on buildings selected by a caller-supplied
/// trigger, applying a caller-supplied policy.
///
/// The default configuration ([`DisasterSystem::inert`]) never triggers and
/// carries the no-op [`Unscathed`] policy, so wiring the system into a run
/// changes nothing observable until a real trigger and policy are supplied.
pub struct DisasterSystem {
    policy: Box<dyn DisasterPolicy>,
    trigger: DisasterTrigger,
}

impl DisasterSystem {
    /// A disaster system that never strikes.
    pub fn inert() -> Self {
        Self {
            policy: Box::new(Unscathed),
            trigger: Box::new(|_, _, _| false),
        }
    }

    pub fn with_policy(trigger: DisasterTrigger, policy: Box<dyn DisasterPolicy>) -> Self {
        Self { policy, trigger }
    }
}

impl SimSystem for DisasterSystem {
    fn name(&self) -> &str {
        "disasters"
    }

    fn frequency(&self) -> TickFrequency {
        TickFrequency::Monthly
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        let time = ctx.world.current_time;

        let struck: Vec<u64> = ctx
            .world
            .buildings
            .values()
            .filter(|&b| (self.trigger)(b, time, ctx.rng))
            .map(|b| b.id)
            .collect();

        for building_id in struck {
            let name = ctx
                .world
                .building(building_id)
                .map(|b| b.name.clone())
                .unwrap_or_default();
            let ev = ctx.world.add_event(
                EventKind::Disaster,
                time,
                format!("Disaster strikes {name} on {time}"),
            );
            let outcome = match ctx.world.strike_building(building_id, &*self.policy, ev) {
                Ok(outcome) => outcome,
                Err(_) => continue,
            };
            debug!(building_id, ?outcome, "disaster applied");
            ctx.signals.push(Signal {
                event_id: ev,
                kind: SignalKind::DisasterStruck {
                    building_id,
                    outcome,
                },
            });
        }
    }
}
