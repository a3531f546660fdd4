use thiserror::Error;

use super::resource::Resource;

/// Failures surfaced by workplace and stockpile mutations.
///
/// Every constructor rejects without mutating, so callers can treat an `Err`
/// as "nothing happened".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// Delivery would push a counter past the kind's requirement, or the
    /// kind does not use the resource at all.
    #[error("delivering {amount} {resource} exceeds the {remaining} still required")]
    InvalidDelivery {
        resource: Resource,
        amount: u32,
        remaining: u32,
    },

    /// Assignment would push the crew past `max_workers`.
    #[error("assigning {requested} workers exceeds capacity {capacity} (crew is {current})")]
    CapacityExceeded {
        requested: u32,
        current: u32,
        capacity: u32,
    },

    /// Taking more workers than a crew or labor pool holds.
    #[error("taking {requested} workers from {current} available")]
    WorkforceUnderflow { requested: u32, current: u32 },

    /// Stockpile debit larger than what is stored.
    #[error("stockpile holds {available} {resource}, cannot take {requested}")]
    InsufficientStock {
        resource: Resource,
        requested: u32,
        available: u32,
    },

    /// A settlement or building ID that is not in the world.
    #[error("no entity with id {0}")]
    UnknownEntity(u64),
}
