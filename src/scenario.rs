use crate::model::{Building, BuildingKind, EventKind, Resource, Settlement, SimTimestamp, World};

// -- Builder-style ref types --

/// Typed reference to a settlement in a [`Scenario`], enabling chained field
/// mutation. Call [`.id()`](SettlementRef::id) to terminate the chain and
/// extract the entity ID.
pub struct SettlementRef<'a> {
    scenario: &'a mut Scenario,
    id: u64,
}

impl<'a> SettlementRef<'a> {
    fn data_mut(&mut self) -> &mut Settlement {
        self.scenario.world.settlements.get_mut(&self.id).unwrap()
    }

    pub fn stockpile(mut self, resource: Resource, amount: u32) -> Self {
        self.data_mut().stockpile.set(resource, amount);
        self
    }

    pub fn laborers(mut self, v: u32) -> Self {
        self.data_mut().laborers = v;
        self
    }

    /// Escape hatch: apply an arbitrary closure to the settlement.
    pub fn with(mut self, f: impl FnOnce(&mut Settlement)) -> Self {
        f(self.data_mut());
        self
    }

    /// Terminate the chain and return the entity ID.
    pub fn id(self) -> u64 {
        self.id
    }
}

/// Typed reference to a building in a [`Scenario`], enabling chained field
/// mutation. Call [`.id()`](BuildingRef::id) to terminate the chain and
/// extract the entity ID.
pub struct BuildingRef<'a> {
    scenario: &'a mut Scenario,
    id: u64,
}

impl<'a> BuildingRef<'a> {
    fn data_mut(&mut self) -> &mut Building {
        self.scenario.world.buildings.get_mut(&self.id).unwrap()
    }

    /// Set a delivered counter directly (no stockpile involved).
    pub fn delivered(mut self, resource: Resource, amount: u32) -> Self {
        let b = self.data_mut();
        assert!(
            amount <= b.blueprint().cost(resource),
            "scenario delivered {amount} {resource} exceeds the blueprint cost"
        );
        b.site.delivered.set(resource, amount);
        self
    }

    /// Mark the site fully delivered and usable.
    pub fn completed(mut self) -> Self {
        let b = self.data_mut();
        for r in Resource::CONSTRUCTION {
            let cost = b.blueprint().cost(r);
            b.site.delivered.set(r, cost);
        }
        b.site.usable = true;
        self
    }

    /// Put workers on the crew directly (the settlement pool is untouched).
    pub fn workers(mut self, v: u32) -> Self {
        let b = self.data_mut();
        assert!(
            v <= b.blueprint().max_workers,
            "scenario workers {v} exceed the blueprint capacity"
        );
        b.site.workers = v;
        self
    }

    pub fn usable(mut self, v: bool) -> Self {
        self.data_mut().site.usable = v;
        self
    }

    /// Escape hatch: apply an arbitrary closure to the building.
    pub fn with(mut self, f: impl FnOnce(&mut Building)) -> Self {
        f(self.data_mut());
        self
    }

    /// Terminate the chain and return the entity ID.
    pub fn id(self) -> u64 {
        self.id
    }
}

/// Fluent builder for constructing `World` state.
///
/// Handles event creation automatically and mutates records through closures
/// and chained setters, so adding struct fields never breaks callers. Used by
/// tests for deterministic setup.
pub struct Scenario {
    world: World,
    setup_event: u64,
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario {
    /// Create a new scenario starting at year 1.
    pub fn new() -> Self {
        Self::at_year(1)
    }

    /// Create a new scenario with the clock set to the start of `year`.
    pub fn at_year(year: u32) -> Self {
        let mut world = World::new();
        world.current_time = SimTimestamp::from_year(year);
        let setup_event = world.add_event(
            EventKind::Custom("scenario_setup".to_string()),
            world.current_time,
            "Scenario setup".to_string(),
        );
        Self { world, setup_event }
    }

    /// Add a settlement with an empty stockpile and no laborers.
    pub fn add_settlement(&mut self, name: &str) -> u64 {
        self.world.add_settlement(name.to_string(), self.setup_event)
    }

    /// Add a settlement and return a chainable reference to it.
    pub fn settlement(&mut self, name: &str) -> SettlementRef<'_> {
        let id = self.add_settlement(name);
        SettlementRef { scenario: self, id }
    }

    /// Chainable reference to an existing settlement.
    pub fn settlement_mut(&mut self, id: u64) -> SettlementRef<'_> {
        assert!(
            self.world.settlements.contains_key(&id),
            "settlement_mut: settlement {id} not found"
        );
        SettlementRef { scenario: self, id }
    }

    /// Add a freshly planned building named after its kind.
    pub fn add_building(&mut self, kind: BuildingKind, settlement: u64) -> u64 {
        let name = format!(
            "{} {}",
            self.world
                .settlement(settlement)
                .expect("add_building: settlement not found")
                .name,
            kind.label()
        );
        self.world
            .add_building(kind, name, settlement, self.setup_event)
    }

    /// Add a building and return a chainable reference to it.
    pub fn building(&mut self, kind: BuildingKind, settlement: u64) -> BuildingRef<'_> {
        let id = self.add_building(kind, settlement);
        BuildingRef { scenario: self, id }
    }

    /// Chainable reference to an existing building.
    pub fn building_mut(&mut self, id: u64) -> BuildingRef<'_> {
        assert!(
            self.world.buildings.contains_key(&id),
            "building_mut: building {id} not found"
        );
        BuildingRef { scenario: self, id }
    }

    /// Finish setup and hand the world over.
    pub fn build(self) -> World {
        self.world
    }
}
