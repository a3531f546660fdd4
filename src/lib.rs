pub mod db;
pub mod ecs;
pub mod flush;
pub mod id;
pub mod model;
pub mod scenario;
pub mod sim;
pub mod testutil;

pub use id::IdGenerator;
pub use model::{
    Blueprint, Building, BuildingKind, DisasterOutcome, DisasterPolicy, Event, EventEffect,
    EventKind, Resource, ResourceLedger, Settlement, SimError, SimTimestamp, StateChange,
    Unscathed, Workplace, World,
};
