use std::ops::Deref;

use bevy_ecs::component::Component;
use bevy_ecs::entity::Entity;

use super::time::SimTime;
use crate::model::{BuildingKind, ResourceLedger, Workplace};

/// Core identity component on every ECS entity that maps to a simulation
/// record (shares the monotonic ID space with the model world).
#[derive(Component, Debug, Clone)]
pub struct SimEntity {
    pub id: u64,
    pub name: String,
    pub founded: SimTime,
}

// --- Marker components ---

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Settlement;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Building;

// --- Data components ---

/// Stockpile and idle labor pool of a settlement.
#[derive(Component, Debug, Clone, Default)]
pub struct SettlementCore {
    pub stockpile: ResourceLedger,
    pub laborers: u32,
}

/// Construction and staffing state of one building site.
#[derive(Component, Debug, Clone)]
pub struct SiteState {
    pub kind: BuildingKind,
    pub site: Workplace,
}

impl SiteState {
    /// A freshly planned site: zeroed deliveries, empty crew, unusable.
    pub fn planned(kind: BuildingKind) -> Self {
        Self {
            kind,
            site: Workplace::default(),
        }
    }

    pub fn remaining(&self, resource: crate::model::Resource) -> u32 {
        self.site.remaining(self.kind.blueprint(), resource)
    }

    pub fn is_complete(&self) -> bool {
        self.site.is_complete(self.kind.blueprint())
    }
}

// --- Relationships ---

/// Building → settlement containment.
#[derive(Component, Clone, Debug)]
#[relationship(relationship_target = LocatedInSources)]
pub struct LocatedIn(pub Entity);

#[derive(Component, Default, Debug)]
#[relationship_target(relationship = LocatedIn)]
pub struct LocatedInSources(Vec<Entity>);

impl Deref for LocatedInSources {
    type Target = [Entity];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
