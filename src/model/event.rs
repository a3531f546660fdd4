use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::building::BuildingKind;
use super::timestamp::SimTimestamp;

/// What happened. The closed set covers everything the shipped systems emit;
/// `Custom` keeps the log open for caller-defined collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    SettlementFounded,
    BuildingPlanned,
    ResourcesDelivered,
    ConstructionCompleted,
    WorkersAssigned,
    WorkersReleased,
    Disaster,
    Custom(String),
}

impl Serialize for EventKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let s = match self {
            EventKind::SettlementFounded => "settlement_founded",
            EventKind::BuildingPlanned => "building_planned",
            EventKind::ResourcesDelivered => "resources_delivered",
            EventKind::ConstructionCompleted => "construction_completed",
            EventKind::WorkersAssigned => "workers_assigned",
            EventKind::WorkersReleased => "workers_released",
            EventKind::Disaster => "disaster",
            EventKind::Custom(s) => s.as_str(),
        };
        serializer.serialize_str(s)
    }
}

impl<'de> Deserialize<'de> for EventKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "settlement_founded" => Ok(EventKind::SettlementFounded),
            "building_planned" => Ok(EventKind::BuildingPlanned),
            "resources_delivered" => Ok(EventKind::ResourcesDelivered),
            "construction_completed" => Ok(EventKind::ConstructionCompleted),
            "workers_assigned" => Ok(EventKind::WorkersAssigned),
            "workers_released" => Ok(EventKind::WorkersReleased),
            "disaster" => Ok(EventKind::Disaster),
            _ => {
                if s.is_empty() {
                    Err(de::Error::custom("event kind cannot be empty"))
                } else {
                    Ok(EventKind::Custom(s))
                }
            }
        }
    }
}

/// One entry in the append-only event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    pub kind: EventKind,
    pub timestamp: SimTimestamp,
    pub description: String,
    /// Causal parent, for tracing chains like delivery → completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caused_by: Option<u64>,
}

/// A single field-level consequence of an event, keyed to the settlement or
/// building it touched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEffect {
    pub event_id: u64,
    pub entity_id: u64,
    pub effect: StateChange,
}

/// The concrete state transition an effect records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StateChange {
    SettlementCreated { name: String },
    BuildingCreated { kind: BuildingKind, name: String },
    FieldChanged {
        field: String,
        old_value: serde_json::Value,
        new_value: serde_json::Value,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&EventKind::ConstructionCompleted).unwrap(),
            "\"construction_completed\""
        );
    }

    #[test]
    fn custom_kind_serializes_as_plain_string() {
        let kind = EventKind::Custom("eclipse".to_string());
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"eclipse\"");
    }

    #[test]
    fn unknown_string_deserializes_to_custom() {
        let kind: EventKind = serde_json::from_str("\"eclipse\"").unwrap();
        assert_eq!(kind, EventKind::Custom("eclipse".to_string()));
    }

    #[test]
    fn known_kinds_round_trip() {
        for kind in [
            EventKind::SettlementFounded,
            EventKind::BuildingPlanned,
            EventKind::ResourcesDelivered,
            EventKind::ConstructionCompleted,
            EventKind::WorkersAssigned,
            EventKind::WorkersReleased,
            EventKind::Disaster,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            let back: EventKind = serde_json::from_str(&json).unwrap();
            assert_eq!(back, kind);
        }
    }

    #[test]
    fn empty_kind_rejected() {
        assert!(serde_json::from_str::<EventKind>("\"\"").is_err());
    }

    #[test]
    fn event_omits_absent_cause() {
        let ev = Event {
            id: 1,
            kind: EventKind::BuildingPlanned,
            timestamp: SimTimestamp::from_year(5),
            description: "Barn planned".to_string(),
            caused_by: None,
        };
        let json = serde_json::to_value(&ev).unwrap();
        assert!(json.get("caused_by").is_none());
    }

    #[test]
    fn state_change_tagged_snake_case() {
        let change = StateChange::FieldChanged {
            field: "workers".to_string(),
            old_value: serde_json::json!(0),
            new_value: serde_json::json!(5),
        };
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(json["type"], "field_changed");
        assert_eq!(json["new_value"], 5);
    }
}
