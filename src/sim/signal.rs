use serde::{Deserialize, Serialize};

use crate::model::{BuildingKind, DisasterOutcome, Resource};

/// A signal emitted by one system and consumed by others.
/// Carries the event_id that caused it, enabling `caused_by` chains
/// when reacting systems create follow-up events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// The event that triggered this signal (for causal linking).
    pub event_id: u64,
    /// What happened.
    pub kind: SignalKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SignalKind {
    /// Construction material moved from a stockpile onto a site.
    ResourcesDelivered {
        building_id: u64,
        settlement_id: u64,
        resource: Resource,
        amount: u32,
    },

    /// A site received its last outstanding resource and became usable.
    ConstructionCompleted {
        building_id: u64,
        settlement_id: u64,
        kind: BuildingKind,
    },

    /// Workers joined a building's crew.
    WorkersAssigned { building_id: u64, count: u32 },

    /// Workers left a building's crew back into the settlement pool.
    WorkersReleased { building_id: u64, count: u32 },

    /// A disaster policy was applied to a building.
    DisasterStruck {
        building_id: u64,
        outcome: DisasterOutcome,
    },

    /// Extensible: any system can emit a custom signal.
    Custom {
        name: String,
        data: serde_json::Value,
    },
}
