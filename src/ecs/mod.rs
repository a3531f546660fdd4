pub mod app;
pub mod clock;
pub mod components;
pub mod conditions;
pub mod messages;
pub mod resources;
pub mod schedule;
pub mod spawn;
pub mod systems;
pub mod time;

pub use app::{build_sim_app, build_sim_app_seeded, build_sim_app_with_executor};
pub use clock::SimClock;
pub use messages::SiteMessage;
pub use schedule::{DomainSet, SimPhase, SimTick};
pub use time::SimTime;
