use std::collections::BTreeMap;

use super::building::{Building, BuildingKind, DisasterOutcome, DisasterPolicy};
use super::error::SimError;
use super::event::{Event, EventEffect, EventKind, StateChange};
use super::resource::Resource;
use super::settlement::Settlement;
use super::timestamp::SimTimestamp;
use crate::id::IdGenerator;

/// The full simulation state: settlements, buildings, and the append-only
/// event/effect log that explains every mutation.
///
/// Mutation is single-threaded: the tick loop owns the world and serializes
/// all writes. There is no interior locking.
#[derive(Debug)]
pub struct World {
    pub settlements: BTreeMap<u64, Settlement>,
    pub buildings: BTreeMap<u64, Building>,
    pub events: BTreeMap<u64, Event>,
    pub event_effects: Vec<EventEffect>,
    pub id_gen: IdGenerator,
    pub current_time: SimTimestamp,
}

impl World {
    pub fn new() -> Self {
        Self {
            settlements: BTreeMap::new(),
            buildings: BTreeMap::new(),
            events: BTreeMap::new(),
            event_effects: Vec::new(),
            id_gen: IdGenerator::new(),
            current_time: SimTimestamp::from_year(0),
        }
    }

    /// Add an event to the log, assigning it a unique ID.
    pub fn add_event(
        &mut self,
        kind: EventKind,
        timestamp: SimTimestamp,
        description: String,
    ) -> u64 {
        let id = self.id_gen.next_id();
        self.events.insert(
            id,
            Event {
                id,
                kind,
                timestamp,
                description,
                caused_by: None,
            },
        );
        id
    }

    /// Add an event caused by another event.
    ///
    /// # Panics
    /// Panics if `caused_by` does not exist or the effect would predate its
    /// cause.
    pub fn add_caused_event(
        &mut self,
        kind: EventKind,
        timestamp: SimTimestamp,
        description: String,
        caused_by: u64,
    ) -> u64 {
        let cause = self
            .events
            .get(&caused_by)
            .unwrap_or_else(|| panic!("add_caused_event: cause event {caused_by} not found"));
        assert!(
            timestamp >= cause.timestamp,
            "add_caused_event: effect timestamp cannot be before cause timestamp"
        );
        let id = self.id_gen.next_id();
        self.events.insert(
            id,
            Event {
                id,
                kind,
                timestamp,
                description,
                caused_by: Some(caused_by),
            },
        );
        id
    }

    /// Record a field-level effect of an event.
    ///
    /// # Panics
    /// Panics if `event_id` does not exist.
    pub fn record_change(
        &mut self,
        entity_id: u64,
        event_id: u64,
        field: &str,
        old_value: serde_json::Value,
        new_value: serde_json::Value,
    ) {
        assert!(
            self.events.contains_key(&event_id),
            "record_change: event {event_id} not found"
        );
        self.event_effects.push(EventEffect {
            event_id,
            entity_id,
            effect: StateChange::FieldChanged {
                field: field.to_string(),
                old_value,
                new_value,
            },
        });
    }

    /// Found a settlement at the current time.
    ///
    /// # Panics
    /// Panics if `event_id` does not exist.
    pub fn add_settlement(&mut self, name: String, event_id: u64) -> u64 {
        assert!(
            self.events.contains_key(&event_id),
            "add_settlement: event {event_id} not found"
        );
        let id = self.id_gen.next_id();
        self.settlements.insert(
            id,
            Settlement {
                id,
                name: name.clone(),
                founded: self.current_time,
                stockpile: Default::default(),
                laborers: 0,
            },
        );
        self.event_effects.push(EventEffect {
            event_id,
            entity_id: id,
            effect: StateChange::SettlementCreated { name },
        });
        id
    }

    /// Plan a building in a settlement. The new building carries its kind's
    /// fixed requirements, zeroed deliveries, and an empty crew.
    ///
    /// # Panics
    /// Panics if `settlement_id` or `event_id` does not exist.
    pub fn add_building(
        &mut self,
        kind: BuildingKind,
        name: String,
        settlement_id: u64,
        event_id: u64,
    ) -> u64 {
        assert!(
            self.events.contains_key(&event_id),
            "add_building: event {event_id} not found"
        );
        assert!(
            self.settlements.contains_key(&settlement_id),
            "add_building: settlement {settlement_id} not found"
        );
        let id = self.id_gen.next_id();
        self.buildings.insert(
            id,
            Building::new(id, settlement_id, name.clone(), kind, self.current_time),
        );
        self.event_effects.push(EventEffect {
            event_id,
            entity_id: id,
            effect: StateChange::BuildingCreated { kind, name },
        });
        id
    }

    pub fn building(&self, id: u64) -> Result<&Building, SimError> {
        self.buildings.get(&id).ok_or(SimError::UnknownEntity(id))
    }

    pub fn settlement(&self, id: u64) -> Result<&Settlement, SimError> {
        self.settlements
            .get(&id)
            .ok_or(SimError::UnknownEntity(id))
    }

    /// All buildings placed in the given settlement, in ID order.
    pub fn buildings_in(&self, settlement_id: u64) -> impl Iterator<Item = &Building> {
        self.buildings
            .values()
            .filter(move |b| b.settlement_id == settlement_id)
    }

    /// Add stock to a settlement's stockpile. Records the ledger change.
    pub fn credit_stockpile(
        &mut self,
        settlement_id: u64,
        resource: Resource,
        amount: u32,
        event_id: u64,
    ) -> Result<(), SimError> {
        let settlement = self
            .settlements
            .get_mut(&settlement_id)
            .ok_or(SimError::UnknownEntity(settlement_id))?;
        let old = settlement.stockpile.amount(resource);
        settlement.stockpile.credit(resource, amount);
        let new = settlement.stockpile.amount(resource);
        self.record_change(
            settlement_id,
            event_id,
            &format!("stockpile.{resource}"),
            serde_json::json!(old),
            serde_json::json!(new),
        );
        Ok(())
    }

    /// Take stock out of a settlement's stockpile. Records the ledger change.
    pub fn debit_stockpile(
        &mut self,
        settlement_id: u64,
        resource: Resource,
        amount: u32,
        event_id: u64,
    ) -> Result<(), SimError> {
        let settlement = self
            .settlements
            .get_mut(&settlement_id)
            .ok_or(SimError::UnknownEntity(settlement_id))?;
        let old = settlement.stockpile.amount(resource);
        settlement.stockpile.debit(resource, amount)?;
        let new = settlement.stockpile.amount(resource);
        self.record_change(
            settlement_id,
            event_id,
            &format!("stockpile.{resource}"),
            serde_json::json!(old),
            serde_json::json!(new),
        );
        Ok(())
    }

    /// Deliver construction material to a building, recording the counter
    /// change and, when this delivery completes the site, the usability flip.
    pub fn deliver_to_building(
        &mut self,
        building_id: u64,
        resource: Resource,
        amount: u32,
        event_id: u64,
    ) -> Result<(), SimError> {
        let building = self
            .buildings
            .get_mut(&building_id)
            .ok_or(SimError::UnknownEntity(building_id))?;
        let old = building.site.delivered.amount(resource);
        let was_usable = building.site.usable;
        building.deliver(resource, amount)?;
        let new = building.site.delivered.amount(resource);
        let now_usable = building.site.usable;
        self.record_change(
            building_id,
            event_id,
            &format!("delivered.{resource}"),
            serde_json::json!(old),
            serde_json::json!(new),
        );
        if !was_usable && now_usable {
            self.record_change(
                building_id,
                event_id,
                "usable",
                serde_json::json!(false),
                serde_json::json!(true),
            );
        }
        Ok(())
    }

    /// Move `count` idle laborers from the settlement pool onto a building's
    /// crew. Fails when the pool or the building's capacity cannot cover it.
    pub fn assign_workers(
        &mut self,
        building_id: u64,
        count: u32,
        event_id: u64,
    ) -> Result<(), SimError> {
        let building = self
            .buildings
            .get_mut(&building_id)
            .ok_or(SimError::UnknownEntity(building_id))?;
        let settlement_id = building.settlement_id;
        let old = building.site.workers;
        let pool = self
            .settlements
            .get(&settlement_id)
            .map(|s| s.laborers)
            .unwrap_or(0);
        if count > pool {
            return Err(SimError::WorkforceUnderflow {
                requested: count,
                current: pool,
            });
        }
        building.assign_workers(count)?;
        let new = building.site.workers;
        self.settlements
            .get_mut(&settlement_id)
            .expect("assign_workers: building points at a missing settlement")
            .laborers -= count;
        self.record_change(
            building_id,
            event_id,
            "workers",
            serde_json::json!(old),
            serde_json::json!(new),
        );
        Ok(())
    }

    /// Move `count` workers off a building's crew back into the settlement
    /// pool.
    pub fn release_workers(
        &mut self,
        building_id: u64,
        count: u32,
        event_id: u64,
    ) -> Result<(), SimError> {
        let building = self
            .buildings
            .get_mut(&building_id)
            .ok_or(SimError::UnknownEntity(building_id))?;
        let settlement_id = building.settlement_id;
        let old = building.site.workers;
        building.release_workers(count)?;
        let new = building.site.workers;
        self.settlements
            .get_mut(&settlement_id)
            .expect("release_workers: building points at a missing settlement")
            .laborers += count;
        self.record_change(
            building_id,
            event_id,
            "workers",
            serde_json::json!(old),
            serde_json::json!(new),
        );
        Ok(())
    }

    /// Apply a disaster to a building through the given policy, recording
    /// every field the policy changed. Workers the policy removed are lost,
    /// not returned to the pool.
    pub fn strike_building(
        &mut self,
        building_id: u64,
        policy: &dyn DisasterPolicy,
        event_id: u64,
    ) -> Result<DisasterOutcome, SimError> {
        let building = self
            .buildings
            .get_mut(&building_id)
            .ok_or(SimError::UnknownEntity(building_id))?;
        let before = building.site.clone();
        let outcome = building.disaster(policy);
        let after = building.site.clone();

        if after.workers != before.workers {
            self.record_change(
                building_id,
                event_id,
                "workers",
                serde_json::json!(before.workers),
                serde_json::json!(after.workers),
            );
        }
        if after.usable != before.usable {
            self.record_change(
                building_id,
                event_id,
                "usable",
                serde_json::json!(before.usable),
                serde_json::json!(after.usable),
            );
        }
        for r in Resource::CONSTRUCTION {
            let (old, new) = (before.delivered.amount(r), after.delivered.amount(r));
            if old != new {
                self.record_change(
                    building_id,
                    event_id,
                    &format!("delivered.{r}"),
                    serde_json::json!(old),
                    serde_json::json!(new),
                );
            }
        }
        Ok(outcome)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
