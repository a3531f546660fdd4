use bevy_ecs::entity::Entity;
use bevy_ecs::message::Message;

use crate::model::{BuildingKind, DisasterOutcome, Resource};

/// Buffered messages emitted by the site systems for cross-system reactions.
///
/// Each variant carries an `event_id` linking back to the EventLog entry
/// that caused it, enabling causal chain propagation.
#[derive(Message, Clone, Debug)]
pub enum SiteMessage {
    ResourcesDelivered {
        event_id: u64,
        building: Entity,
        settlement: Entity,
        resource: Resource,
        amount: u32,
    },
    ConstructionCompleted {
        event_id: u64,
        building: Entity,
        settlement: Entity,
        kind: BuildingKind,
    },
    WorkersAssigned {
        event_id: u64,
        building: Entity,
        count: u32,
    },
    WorkersReleased {
        event_id: u64,
        building: Entity,
        count: u32,
    },
    DisasterStruck {
        event_id: u64,
        building: Entity,
        outcome: DisasterOutcome,
    },
}
