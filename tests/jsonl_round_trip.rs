mod common;

use hamlet::flush::flush_to_jsonl;
use hamlet::model::*;

use common::read_lines;

#[test]
fn flush_produces_valid_jsonl_files() {
    let world = common::build_test_world();
    let dir = tempfile::tempdir().unwrap();

    flush_to_jsonl(&world, dir.path()).unwrap();

    let settlements_path = dir.path().join("settlements.jsonl");
    let buildings_path = dir.path().join("buildings.jsonl");
    let events_path = dir.path().join("events.jsonl");
    let effects_path = dir.path().join("event_effects.jsonl");

    assert!(settlements_path.exists());
    assert!(buildings_path.exists());
    assert!(events_path.exists());
    assert!(effects_path.exists());

    assert_eq!(read_lines(&settlements_path).len(), 1, "expected 1 settlement");
    assert_eq!(read_lines(&buildings_path).len(), 2, "expected 2 buildings");
    assert_eq!(read_lines(&events_path).len(), 3, "expected 3 events");
    assert_eq!(read_lines(&effects_path).len(), 5, "expected 5 effects");

    for line in &read_lines(&buildings_path) {
        let v: serde_json::Value = serde_json::from_str(line).unwrap();
        assert!(v.get("id").is_some());
        assert!(v.get("kind").is_some());
        assert!(v.get("settlement_id").is_some());
        assert!(v.get("workers").is_some());
        assert!(v.get("usable").is_some());
    }
}

#[test]
fn every_flushed_record_round_trips() {
    let world = common::build_test_world();
    let dir = tempfile::tempdir().unwrap();

    flush_to_jsonl(&world, dir.path()).unwrap();

    let settlements: Vec<Settlement> = read_lines(&dir.path().join("settlements.jsonl"))
        .iter()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(
        settlements,
        world.settlements.values().cloned().collect::<Vec<_>>()
    );

    let buildings: Vec<Building> = read_lines(&dir.path().join("buildings.jsonl"))
        .iter()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(
        buildings,
        world.buildings.values().cloned().collect::<Vec<_>>()
    );

    let events: Vec<Event> = read_lines(&dir.path().join("events.jsonl"))
        .iter()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(events, world.events.values().cloned().collect::<Vec<_>>());

    let effects: Vec<EventEffect> = read_lines(&dir.path().join("event_effects.jsonl"))
        .iter()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(effects, world.event_effects);
}

#[test]
fn flush_preserves_field_values() {
    let world = common::build_test_world();
    let dir = tempfile::tempdir().unwrap();

    flush_to_jsonl(&world, dir.path()).unwrap();

    let settlement: serde_json::Value =
        serde_json::from_str(&read_lines(&dir.path().join("settlements.jsonl"))[0]).unwrap();
    assert_eq!(settlement["name"], "Ashford");
    assert_eq!(settlement["laborers"], 23);
    assert_eq!(settlement["stockpile"]["stone"], 40);
    assert_eq!(settlement["founded"]["year"], 100);

    let buildings = read_lines(&dir.path().join("buildings.jsonl"));
    let mine: serde_json::Value = serde_json::from_str(&buildings[0]).unwrap();
    assert_eq!(mine["kind"], "coal_mine");
    assert_eq!(mine["name"], "Ashford Coal Mine");
    assert_eq!(mine["delivered"]["stone"], 5);
    assert_eq!(mine["workers"], 2);
    assert_eq!(mine["usable"], false);

    let barn: serde_json::Value = serde_json::from_str(&buildings[1]).unwrap();
    assert_eq!(barn["kind"], "barn");
    assert!(barn["delivered"].as_object().unwrap().is_empty());

    let events = read_lines(&dir.path().join("events.jsonl"));
    let delivery: serde_json::Value = serde_json::from_str(&events[1]).unwrap();
    assert_eq!(delivery["kind"], "resources_delivered");
    assert_eq!(delivery["timestamp"]["year"], 100);
    assert_eq!(delivery["description"], "Stone hauled to the mine");
}
