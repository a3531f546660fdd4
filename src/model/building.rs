use serde::{Deserialize, Serialize};

use super::error::SimError;
use super::resource::{Resource, ResourceLedger};
use super::timestamp::SimTimestamp;

// --- Per-kind construction costs & crew capacities ---

/// Compile-time constants for one building kind: what it costs to raise and
/// how many workers it can employ once raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blueprint {
    pub stone: u32,
    pub wood: u32,
    pub iron: u32,
    pub max_workers: u32,
}

impl Blueprint {
    /// Cost in the given resource. Resources outside the construction set
    /// cost zero for every kind.
    pub fn cost(&self, resource: Resource) -> u32 {
        match resource {
            Resource::Stone => self.stone,
            Resource::Wood => self.wood,
            Resource::Iron => self.iron,
            Resource::Food => 0,
        }
    }

    pub fn total_cost(&self) -> u32 {
        self.stone + self.wood + self.iron
    }
}

/// The kinds of buildable workplaces.
///
/// Each kind is a thin tag over its [`Blueprint`]; shared mutable state lives
/// in [`Workplace`]. Adding a kind means adding a variant and a blueprint
/// arm, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingKind {
    CoalMine,
    Quarry,
    Barn,
    Farm,
    Home,
}

impl BuildingKind {
    pub const ALL: [BuildingKind; 5] = [
        BuildingKind::CoalMine,
        BuildingKind::Quarry,
        BuildingKind::Barn,
        BuildingKind::Farm,
        BuildingKind::Home,
    ];

    pub fn blueprint(self) -> &'static Blueprint {
        match self {
            BuildingKind::CoalMine => &Blueprint {
                stone: 10,
                wood: 10,
                iron: 10,
                max_workers: 100,
            },
            BuildingKind::Quarry => &Blueprint {
                stone: 40,
                wood: 40,
                iron: 0,
                max_workers: 6,
            },
            BuildingKind::Barn => &Blueprint {
                stone: 30,
                wood: 60,
                iron: 0,
                max_workers: 3,
            },
            BuildingKind::Farm => &Blueprint {
                stone: 10,
                wood: 30,
                iron: 0,
                max_workers: 8,
            },
            BuildingKind::Home => &Blueprint {
                stone: 20,
                wood: 40,
                iron: 0,
                max_workers: 2,
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BuildingKind::CoalMine => "Coal Mine",
            BuildingKind::Quarry => "Quarry",
            BuildingKind::Barn => "Barn",
            BuildingKind::Farm => "Farm",
            BuildingKind::Home => "Home",
        }
    }
}

// --- Shared workplace state ---

/// Mutable state every buildable workplace shares: cumulative deliveries,
/// the assigned crew, and the usability gate.
///
/// All mutations go through the checked operations below (or their
/// [`Building`] wrappers); the invariants `delivered[r] <= cost[r]` and
/// `workers <= max_workers` hold between any two calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workplace {
    pub delivered: ResourceLedger,
    pub workers: u32,
    pub usable: bool,
}

impl Workplace {
    /// How much of `resource` is still missing before construction completes.
    pub fn remaining(&self, blueprint: &Blueprint, resource: Resource) -> u32 {
        blueprint.cost(resource) - self.delivered.amount(resource)
    }

    /// True once every required resource is fully delivered.
    pub fn is_complete(&self, blueprint: &Blueprint) -> bool {
        Resource::CONSTRUCTION
            .iter()
            .all(|&r| self.remaining(blueprint, r) == 0)
    }

    /// Accept a delivery of `amount` of `resource` toward construction.
    ///
    /// Fails with [`SimError::InvalidDelivery`] when the amount exceeds what
    /// is still required (which includes resources the kind never uses).
    /// Flips `usable` on the delivery that completes the last outstanding
    /// resource.
    pub fn deliver(
        &mut self,
        blueprint: &Blueprint,
        resource: Resource,
        amount: u32,
    ) -> Result<(), SimError> {
        let remaining = self.remaining(blueprint, resource);
        if amount > remaining {
            return Err(SimError::InvalidDelivery {
                resource,
                amount,
                remaining,
            });
        }
        self.delivered.credit(resource, amount);
        if self.is_complete(blueprint) {
            self.usable = true;
        }
        Ok(())
    }

    /// Add `count` workers to the crew, failing with
    /// [`SimError::CapacityExceeded`] past `max_workers`.
    pub fn assign_workers(&mut self, blueprint: &Blueprint, count: u32) -> Result<(), SimError> {
        if self.workers + count > blueprint.max_workers {
            return Err(SimError::CapacityExceeded {
                requested: count,
                current: self.workers,
                capacity: blueprint.max_workers,
            });
        }
        self.workers += count;
        Ok(())
    }

    /// Remove `count` workers from the crew, failing with
    /// [`SimError::WorkforceUnderflow`] below zero.
    pub fn release_workers(&mut self, count: u32) -> Result<(), SimError> {
        if count > self.workers {
            return Err(SimError::WorkforceUnderflow {
                requested: count,
                current: self.workers,
            });
        }
        self.workers -= count;
        Ok(())
    }

    /// Apply a disaster to this workplace through the given policy.
    ///
    /// # Panics
    /// Panics if the policy leaves the workplace outside its invariants.
    pub fn strike(&mut self, kind: BuildingKind, policy: &dyn DisasterPolicy) -> DisasterOutcome {
        let outcome = policy.strike(kind, self);
        let bp = kind.blueprint();
        assert!(
            self.workers <= bp.max_workers,
            "disaster policy left {} workers on a site with capacity {}",
            self.workers,
            bp.max_workers
        );
        for r in Resource::CONSTRUCTION {
            assert!(
                self.delivered.amount(r) <= bp.cost(r),
                "disaster policy left delivered {} above the required {}",
                r,
                bp.cost(r)
            );
        }
        outcome
    }
}

// --- Disaster extension point ---

/// What a disaster did to a building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DisasterOutcome {
    /// Nothing changed (the default policy).
    Unaffected,
    /// The policy mutated the workplace.
    Struck {
        workers_lost: u32,
        usability_revoked: bool,
    },
}

/// Policy deciding what a disaster does to a workplace.
///
/// The hook exists so event collaborators can rely on the operation being
/// present; no concrete damage rule ships with the crate. Policies must keep
/// the workplace invariants intact (`delivered` within cost, `workers` within
/// capacity); [`Building::disaster`] asserts them after the strike.
pub trait DisasterPolicy: Send + Sync {
    fn strike(&self, kind: BuildingKind, site: &mut Workplace) -> DisasterOutcome;
}

/// The default policy: every building shrugs the disaster off.
///
/// TODO: replace with a real damage table once the event collaborator
/// defines one; tests pin the no-op behavior until then.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unscathed;

impl DisasterPolicy for Unscathed {
    fn strike(&self, _kind: BuildingKind, _site: &mut Workplace) -> DisasterOutcome {
        DisasterOutcome::Unaffected
    }
}

// --- Building instances ---

/// One placed building in a settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub id: u64,
    pub settlement_id: u64,
    pub name: String,
    pub kind: BuildingKind,
    pub founded: SimTimestamp,
    #[serde(flatten)]
    pub site: Workplace,
}

impl Building {
    /// A freshly planned building: zeroed deliveries, empty crew, unusable.
    /// All requirement values come from the kind's blueprint; creation takes
    /// no other inputs.
    pub fn new(
        id: u64,
        settlement_id: u64,
        name: String,
        kind: BuildingKind,
        founded: SimTimestamp,
    ) -> Self {
        Self {
            id,
            settlement_id,
            name,
            kind,
            founded,
            site: Workplace::default(),
        }
    }

    pub fn blueprint(&self) -> &'static Blueprint {
        self.kind.blueprint()
    }

    /// How much of `resource` is still missing before construction completes.
    pub fn remaining(&self, resource: Resource) -> u32 {
        self.site.remaining(self.blueprint(), resource)
    }

    /// True once every required resource is fully delivered.
    pub fn is_complete(&self) -> bool {
        self.site.is_complete(self.blueprint())
    }

    /// See [`Workplace::deliver`].
    pub fn deliver(&mut self, resource: Resource, amount: u32) -> Result<(), SimError> {
        self.site.deliver(self.kind.blueprint(), resource, amount)
    }

    /// See [`Workplace::assign_workers`].
    pub fn assign_workers(&mut self, count: u32) -> Result<(), SimError> {
        self.site.assign_workers(self.kind.blueprint(), count)
    }

    /// See [`Workplace::release_workers`].
    pub fn release_workers(&mut self, count: u32) -> Result<(), SimError> {
        self.site.release_workers(count)
    }

    /// Apply a disaster to this building through the given policy.
    ///
    /// # Panics
    /// Panics if the policy leaves the workplace outside its invariants.
    pub fn disaster(&mut self, policy: &dyn DisasterPolicy) -> DisasterOutcome {
        self.site.strike(self.kind, policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coal_mine() -> Building {
        Building::new(
            1,
            2,
            "Deepshaft".to_string(),
            BuildingKind::CoalMine,
            SimTimestamp::from_year(100),
        )
    }

    #[test]
    fn coal_mine_construction_contract() {
        let b = coal_mine();
        let bp = b.blueprint();
        assert_eq!(bp.stone, 10);
        assert_eq!(bp.wood, 10);
        assert_eq!(bp.iron, 10);
        assert_eq!(bp.max_workers, 100);
        for r in Resource::CONSTRUCTION {
            assert_eq!(b.site.delivered.amount(r), 0);
        }
        assert_eq!(b.site.workers, 0);
        assert!(!b.site.usable);
    }

    #[test]
    fn delivery_accumulates() {
        let mut b = coal_mine();
        b.deliver(Resource::Stone, 4).unwrap();
        b.deliver(Resource::Stone, 6).unwrap();
        assert_eq!(b.site.delivered.amount(Resource::Stone), 10);
        assert_eq!(b.remaining(Resource::Stone), 0);
    }

    #[test]
    fn over_delivery_rejected_without_mutation() {
        let mut b = coal_mine();
        b.deliver(Resource::Wood, 8).unwrap();
        let err = b.deliver(Resource::Wood, 3).unwrap_err();
        assert_eq!(
            err,
            SimError::InvalidDelivery {
                resource: Resource::Wood,
                amount: 3,
                remaining: 2,
            }
        );
        assert_eq!(b.site.delivered.amount(Resource::Wood), 8);
    }

    #[test]
    fn unused_resource_rejected() {
        let mut barn = Building::new(
            1,
            2,
            "Barn".to_string(),
            BuildingKind::Barn,
            SimTimestamp::from_year(1),
        );
        // Barns cost no iron, so any iron delivery exceeds the remaining 0.
        let err = barn.deliver(Resource::Iron, 1).unwrap_err();
        assert!(matches!(err, SimError::InvalidDelivery { remaining: 0, .. }));
    }

    #[test]
    fn usable_flips_exactly_on_completion() {
        let mut b = coal_mine();
        b.deliver(Resource::Stone, 10).unwrap();
        b.deliver(Resource::Wood, 10).unwrap();
        assert!(!b.site.usable);
        b.deliver(Resource::Iron, 9).unwrap();
        assert!(!b.site.usable);
        b.deliver(Resource::Iron, 1).unwrap();
        assert!(b.site.usable);
        assert!(b.is_complete());
    }

    #[test]
    fn workers_clamped_to_capacity() {
        let mut barn = Building::new(
            1,
            2,
            "Barn".to_string(),
            BuildingKind::Barn,
            SimTimestamp::from_year(1),
        );
        barn.assign_workers(3).unwrap();
        let err = barn.assign_workers(1).unwrap_err();
        assert_eq!(
            err,
            SimError::CapacityExceeded {
                requested: 1,
                current: 3,
                capacity: 3,
            }
        );
        assert_eq!(barn.site.workers, 3);
    }

    #[test]
    fn release_cannot_underflow() {
        let mut b = coal_mine();
        b.assign_workers(2).unwrap();
        b.release_workers(2).unwrap();
        let err = b.release_workers(1).unwrap_err();
        assert_eq!(
            err,
            SimError::WorkforceUnderflow {
                requested: 1,
                current: 0,
            }
        );
    }

    #[test]
    fn default_disaster_changes_nothing() {
        let mut b = coal_mine();
        let before = b.clone();
        let outcome = b.disaster(&Unscathed);
        assert_eq!(outcome, DisasterOutcome::Unaffected);
        assert_eq!(b, before);
    }

    #[test]
    fn custom_disaster_policy_is_applied() {
        struct CaveIn;
        impl DisasterPolicy for CaveIn {
            fn strike(&self, _kind: BuildingKind, site: &mut Workplace) -> DisasterOutcome {
                let lost = site.workers.min(5);
                site.workers -= lost;
                site.usable = false;
                DisasterOutcome::Struck {
                    workers_lost: lost,
                    usability_revoked: true,
                }
            }
        }

        let mut b = coal_mine();
        for r in Resource::CONSTRUCTION {
            b.deliver(r, 10).unwrap();
        }
        b.assign_workers(8).unwrap();

        let outcome = b.disaster(&CaveIn);
        assert_eq!(
            outcome,
            DisasterOutcome::Struck {
                workers_lost: 5,
                usability_revoked: true,
            }
        );
        assert_eq!(b.site.workers, 3);
        assert!(!b.site.usable);
    }

    #[test]
    #[should_panic(expected = "disaster policy left")]
    fn invariant_breaking_policy_panics() {
        struct Overstaff;
        impl DisasterPolicy for Overstaff {
            fn strike(&self, kind: BuildingKind, site: &mut Workplace) -> DisasterOutcome {
                site.workers = kind.blueprint().max_workers + 1;
                DisasterOutcome::Struck {
                    workers_lost: 0,
                    usability_revoked: false,
                }
            }
        }
        coal_mine().disaster(&Overstaff);
    }

    #[test]
    fn building_round_trips_through_json() {
        let mut b = coal_mine();
        b.deliver(Resource::Stone, 7).unwrap();
        b.assign_workers(4).unwrap();
        let json = serde_json::to_string(&b).unwrap();
        let back: Building = serde_json::from_str(&json).unwrap();
        assert_eq!(back, b);
    }

    #[test]
    fn kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&BuildingKind::CoalMine).unwrap(),
            "\"coal_mine\""
        );
        let back: BuildingKind = serde_json::from_str("\"quarry\"").unwrap();
        assert_eq!(back, BuildingKind::Quarry);
    }

    #[test]
    fn every_kind_has_positive_capacity() {
        for kind in BuildingKind::ALL {
            assert!(kind.blueprint().max_workers > 0, "{kind:?}");
            assert!(kind.blueprint().total_cost() > 0, "{kind:?}");
        }
    }
}
