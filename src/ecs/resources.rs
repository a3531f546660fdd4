use std::hash::{DefaultHasher, Hash, Hasher};

use bevy_ecs::resource::Resource;
use bevy_ecs::world::World;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::time::SimTime;
use crate::IdGenerator;
use crate::model::EventKind;

/// Deterministic root RNG for the simulation.
#[derive(Resource)]
pub struct SimRng {
    pub rng: SmallRng,
    pub seed: u64,
}

// --- Per-domain RNG resources ---

macro_rules! domain_rng {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Resource)]
        pub struct $name(pub SmallRng);

        impl Default for $name {
            fn default() -> Self {
                Self(SmallRng::seed_from_u64(0))
            }
        }
    };
}

domain_rng!(ConstructionRng, "Per-domain RNG for construction systems.");
domain_rng!(WorkforceRng, "Per-domain RNG for workforce systems.");
domain_rng!(DisasterRng, "Per-domain RNG for disaster systems.");

/// Derive a deterministic per-domain seed from the global seed, domain name,
/// and tick count.
fn derive_domain_seed(seed: u64, domain: &str, tick: u64) -> u64 {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    domain.hash(&mut hasher);
    tick.hash(&mut hasher);
    hasher.finish()
}

/// Exclusive system that re-seeds all per-domain RNGs each tick.
/// Runs in `SimPhase::PreUpdate` before any domain systems.
pub fn distribute_rng(world: &mut World) {
    let seed = world.resource::<SimRng>().seed;
    let tick = world.resource::<super::clock::SimClock>().tick_count;

    macro_rules! reseed {
        ($res:ty, $label:expr) => {
            world.resource_mut::<$res>().0 =
                SmallRng::seed_from_u64(derive_domain_seed(seed, $label, tick));
        };
    }

    reseed!(ConstructionRng, "construction");
    reseed!(WorkforceRng, "workforce");
    reseed!(DisasterRng, "disaster");
}

/// Global ID generator for simulation records.
#[derive(Resource, Default)]
pub struct EcsIdGenerator(pub IdGenerator);

/// An event record using ECS-native `SimTime` (hour resolution).
#[derive(Debug, Clone, PartialEq)]
pub struct EcsEvent {
    pub id: u64,
    pub kind: EventKind,
    pub timestamp: SimTime,
    pub description: String,
    pub caused_by: Option<u64>,
}

/// Accumulates events between flushes.
#[derive(Resource, Debug, Clone, Default)]
pub struct EventLog {
    pub events: Vec<EcsEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event and return its assigned ID.
    pub fn push(
        &mut self,
        id_gen: &mut EcsIdGenerator,
        kind: EventKind,
        timestamp: SimTime,
        description: String,
        caused_by: Option<u64>,
    ) -> u64 {
        let id = id_gen.0.next_id();
        self.events.push(EcsEvent {
            id,
            kind,
            timestamp,
            description,
            caused_by,
        });
        id
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
