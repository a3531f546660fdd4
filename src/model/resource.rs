use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::SimError;

/// A construction or stockpile resource.
///
/// `Food` is stored and consumed by settlements but never appears in a
/// construction cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Stone,
    Wood,
    Iron,
    Food,
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::Stone,
        Resource::Wood,
        Resource::Iron,
        Resource::Food,
    ];

    /// The three resources that can appear in a construction cost.
    pub const CONSTRUCTION: [Resource; 3] = [Resource::Stone, Resource::Wood, Resource::Iron];

    pub fn name(self) -> &'static str {
        match self {
            Resource::Stone => "stone",
            Resource::Wood => "wood",
            Resource::Iron => "iron",
            Resource::Food => "food",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Non-negative per-resource quantities. Absent keys read as zero;
/// zero entries are pruned so equal ledgers compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceLedger(BTreeMap<Resource, u32>);

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style constructor: `ResourceLedger::new().with(Stone, 40)`.
    pub fn with(mut self, resource: Resource, amount: u32) -> Self {
        self.set(resource, amount);
        self
    }

    pub fn amount(&self, resource: Resource) -> u32 {
        self.0.get(&resource).copied().unwrap_or(0)
    }

    pub fn set(&mut self, resource: Resource, amount: u32) {
        if amount == 0 {
            self.0.remove(&resource);
        } else {
            self.0.insert(resource, amount);
        }
    }

    pub fn credit(&mut self, resource: Resource, amount: u32) {
        let new = self.amount(resource) + amount;
        self.set(resource, new);
    }

    /// Remove `amount` of `resource`, failing without mutation if the ledger
    /// holds less than that.
    pub fn debit(&mut self, resource: Resource, amount: u32) -> Result<(), SimError> {
        let available = self.amount(resource);
        if amount > available {
            return Err(SimError::InsufficientStock {
                resource,
                requested: amount,
                available,
            });
        }
        self.set(resource, available - amount);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Resource, u32)> + '_ {
        self.0.iter().map(|(r, n)| (*r, *n))
    }
}

impl FromIterator<(Resource, u32)> for ResourceLedger {
    fn from_iter<T: IntoIterator<Item = (Resource, u32)>>(iter: T) -> Self {
        let mut ledger = Self::new();
        for (r, n) in iter {
            ledger.credit(r, n);
        }
        ledger
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_resource_reads_zero() {
        let ledger = ResourceLedger::new();
        assert_eq!(ledger.amount(Resource::Stone), 0);
        assert!(ledger.is_empty());
    }

    #[test]
    fn credit_accumulates() {
        let mut ledger = ResourceLedger::new();
        ledger.credit(Resource::Wood, 10);
        ledger.credit(Resource::Wood, 5);
        assert_eq!(ledger.amount(Resource::Wood), 15);
        assert_eq!(ledger.total(), 15);
    }

    #[test]
    fn debit_removes() {
        let mut ledger = ResourceLedger::new().with(Resource::Iron, 10);
        ledger.debit(Resource::Iron, 4).unwrap();
        assert_eq!(ledger.amount(Resource::Iron), 6);
    }

    #[test]
    fn debit_rejects_overdraw_without_mutation() {
        let mut ledger = ResourceLedger::new().with(Resource::Stone, 3);
        let err = ledger.debit(Resource::Stone, 4).unwrap_err();
        assert_eq!(
            err,
            SimError::InsufficientStock {
                resource: Resource::Stone,
                requested: 4,
                available: 3,
            }
        );
        assert_eq!(ledger.amount(Resource::Stone), 3);
    }

    #[test]
    fn zero_entries_pruned() {
        let mut ledger = ResourceLedger::new().with(Resource::Wood, 5);
        ledger.debit(Resource::Wood, 5).unwrap();
        assert!(ledger.is_empty());
        assert_eq!(ledger, ResourceLedger::new());
    }

    #[test]
    fn enum_snake_case() {
        assert_eq!(
            serde_json::to_string(&Resource::Stone).unwrap(),
            "\"stone\""
        );
        assert_eq!(serde_json::to_string(&Resource::Iron).unwrap(), "\"iron\"");
    }

    #[test]
    fn ledger_serializes_as_plain_map() {
        let ledger = ResourceLedger::new()
            .with(Resource::Stone, 10)
            .with(Resource::Wood, 20);
        let json = serde_json::to_value(&ledger).unwrap();
        assert_eq!(json["stone"], 10);
        assert_eq!(json["wood"], 20);
    }

    #[test]
    fn ledger_round_trips() {
        let ledger = ResourceLedger::new()
            .with(Resource::Stone, 1)
            .with(Resource::Food, 99);
        let json = serde_json::to_string(&ledger).unwrap();
        let back: ResourceLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ledger);
    }
}
