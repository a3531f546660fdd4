pub mod construction;
pub mod disaster;
pub mod workforce;

pub use construction::deliver_to_sites;
pub use disaster::{DisasterPolicyRes, DisasterQueue, apply_disasters};
pub use workforce::staff_workplaces;
