pub mod building;
pub mod error;
pub mod event;
pub mod resource;
pub mod settlement;
pub mod timestamp;
pub mod world;

pub use building::{
    Blueprint, Building, BuildingKind, DisasterOutcome, DisasterPolicy, Unscathed, Workplace,
};
pub use error::SimError;
pub use event::{Event, EventEffect, EventKind, StateChange};
pub use resource::{Resource, ResourceLedger};
pub use settlement::Settlement;
pub use timestamp::SimTimestamp;
pub use world::World;
