use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::model::World;

/// Write an iterator of serializable items to a JSONL file (one JSON object per line).
fn write_jsonl<T: Serialize>(path: &Path, items: impl Iterator<Item = T>) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for item in items {
        serde_json::to_writer(&mut writer, &item)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Flush the world state to JSONL files in the given output directory.
///
/// Creates the output directory if it does not exist. Writes 4 files:
/// - `settlements.jsonl` — one Settlement per line
/// - `buildings.jsonl` — one Building per line
/// - `events.jsonl` — one Event per line
/// - `event_effects.jsonl` — one EventEffect per line
pub fn flush_to_jsonl(world: &World, output_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(output_dir)?;

    write_jsonl(
        &output_dir.join("settlements.jsonl"),
        world.settlements.values(),
    )?;
    write_jsonl(
        &output_dir.join("buildings.jsonl"),
        world.buildings.values(),
    )?;
    write_jsonl(&output_dir.join("events.jsonl"), world.events.values())?;
    write_jsonl(
        &output_dir.join("event_effects.jsonl"),
        world.event_effects.iter(),
    )?;

    Ok(())
}
