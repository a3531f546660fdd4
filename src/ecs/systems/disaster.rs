//! Disaster application — the ECS counterpart of `sim::DisasterSystem`.
//!
//! Event collaborators queue target buildings in [`DisasterQueue`]; the
//! reaction-phase system drains the queue and applies the policy held in
//! [`DisasterPolicyRes`]. With the default [`Unscathed`] policy the drain is
//! observably a no-op apart from the log entry.

use bevy_ecs::entity::Entity;
use bevy_ecs::message::MessageWriter;
use bevy_ecs::resource::Resource;
use bevy_ecs::system::{Query, Res, ResMut};
use tracing::debug;

use crate::ecs::clock::SimClock;
use crate::ecs::components::{SimEntity, SiteState};
use crate::ecs::messages::SiteMessage;
use crate::ecs::resources::{EcsIdGenerator, EventLog};
use crate::model::{DisasterPolicy, EventKind, Unscathed};

/// Buildings awaiting a disaster strike, queued by event collaborators.
#[derive(Resource, Default)]
pub struct DisasterQueue(pub Vec<Entity>);

/// The disaster policy applied to queued buildings.
#[derive(Resource)]
pub struct DisasterPolicyRes(pub Box<dyn DisasterPolicy>);

impl Default for DisasterPolicyRes {
    fn default() -> Self {
        Self(Box::new(Unscathed))
    }
}

/// Reaction-phase system: applies the configured policy to every queued
/// building, logging the strike and emitting a [`SiteMessage`].
pub fn apply_disasters(
    clock: Res<SimClock>,
    mut queue: ResMut<DisasterQueue>,
    policy: Res<DisasterPolicyRes>,
    mut id_gen: ResMut<EcsIdGenerator>,
    mut log: ResMut<EventLog>,
    mut sites: Query<(&SimEntity, &mut SiteState)>,
    mut out: MessageWriter<SiteMessage>,
) {
    if queue.0.is_empty() {
        return;
    }
    let time = clock.time;

    for building in queue.0.drain(..) {
        let Ok((sim, mut state)) = sites.get_mut(building) else {
            continue;
        };
        let kind = state.kind;
        let outcome = state.site.strike(kind, &*policy.0);
        let event_id = log.push(
            &mut *id_gen,
            EventKind::Disaster,
            time,
            format!("Disaster strikes {} on {time}", sim.name),
            None,
        );
        debug!(building_id = sim.id, ?outcome, "disaster applied");
        out.write(SiteMessage::DisasterStruck {
            event_id,
            building,
            outcome,
        });
    }
}
