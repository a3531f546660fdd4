use serde::Serialize;
use sqlx::PgPool;

use crate::model::{Resource, World};

/// Load an entire `World` into Postgres using COPY FROM STDIN (text format).
///
/// Order respects FK constraints: settlements → buildings → events →
/// event_effects.
pub async fn load_world(pool: &PgPool, world: &World) -> Result<(), sqlx::Error> {
    // Settlements
    {
        let mut buf = String::new();
        for s in world.settlements.values() {
            buf.push_str(&format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\n",
                s.id,
                escape(&s.name),
                s.founded.year(),
                s.founded.day(),
                s.laborers,
                s.stockpile.amount(Resource::Stone),
                s.stockpile.amount(Resource::Wood),
                s.stockpile.amount(Resource::Iron),
            ));
        }
        copy_in(pool, include_str!("../../sql/copy_settlements.sql"), &buf).await?;
    }

    // Buildings
    {
        let mut buf = String::new();
        for b in world.buildings.values() {
            buf.push_str(&format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\n",
                b.id,
                b.settlement_id,
                escape(&b.name),
                escape(&enum_str(&b.kind)),
                b.founded.year(),
                b.founded.day(),
                b.site.delivered.amount(Resource::Stone),
                b.site.delivered.amount(Resource::Wood),
                b.site.delivered.amount(Resource::Iron),
                b.site.workers,
                b.site.usable,
            ));
        }
        copy_in(pool, include_str!("../../sql/copy_buildings.sql"), &buf).await?;
    }

    // Events (before effects due to FK)
    {
        let mut buf = String::new();
        for ev in world.events.values() {
            buf.push_str(&format!(
                "{}\t{}\t{}\t{}\t{}\t{}\n",
                ev.id,
                escape(&enum_str(&ev.kind)),
                ev.timestamp.year(),
                ev.timestamp.day(),
                escape(&ev.description),
                opt_u64(ev.caused_by),
            ));
        }
        copy_in(pool, include_str!("../../sql/copy_events.sql"), &buf).await?;
    }

    // Event effects
    {
        let mut buf = String::new();
        for eff in &world.event_effects {
            let effect_json =
                serde_json::to_string(&eff.effect).expect("effect serialization");
            buf.push_str(&format!(
                "{}\t{}\t{}\n",
                eff.event_id,
                eff.entity_id,
                escape(&effect_json),
            ));
        }
        copy_in(pool, include_str!("../../sql/copy_event_effects.sql"), &buf).await?;
    }

    Ok(())
}

/// Execute a COPY FROM STDIN with the given text-format payload.
async fn copy_in(pool: &PgPool, statement: &str, data: &str) -> Result<(), sqlx::Error> {
    let mut conn = pool.acquire().await?;
    let mut copy = conn.copy_in_raw(statement).await?;
    copy.send(data.as_bytes()).await?;
    copy.finish().await?;
    Ok(())
}

/// Escape a string for Postgres COPY text format.
/// Backslash must be escaped first, then the special whitespace characters.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

/// Render an optional u64 as a COPY text value (`\N` for NULL).
fn opt_u64(v: Option<u64>) -> String {
    match v {
        Some(n) => n.to_string(),
        None => "\\N".to_string(),
    }
}

/// Serialize a serde enum variant to its snake_case string (strips JSON quotes).
fn enum_str<T: Serialize>(val: &T) -> String {
    let json = serde_json::to_string(val).expect("enum serialization");
    // serde_json wraps string enums in quotes: "\"value\""
    json[1..json.len() - 1].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BuildingKind, EventKind};

    #[test]
    fn escape_handles_copy_specials() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a\tb"), "a\\tb");
        assert_eq!(escape("a\nb"), "a\\nb");
        assert_eq!(escape("a\\b"), "a\\\\b");
    }

    #[test]
    fn opt_u64_renders_null_marker() {
        assert_eq!(opt_u64(None), "\\N");
        assert_eq!(opt_u64(Some(7)), "7");
    }

    #[test]
    fn enum_str_strips_quotes() {
        assert_eq!(enum_str(&BuildingKind::CoalMine), "coal_mine");
        assert_eq!(enum_str(&EventKind::Disaster), "disaster");
    }
}
