use serde::{Deserialize, Serialize};

use super::resource::ResourceLedger;
use super::timestamp::SimTimestamp;

/// A settlement: the stockpile construction draws from and the labor pool
/// workplaces are staffed from.
///
/// `laborers` counts idle hands only; workers assigned to a building are
/// tracked on that building and return to the pool when released.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub id: u64,
    pub name: String,
    pub founded: SimTimestamp,
    #[serde(default, skip_serializing_if = "ResourceLedger::is_empty")]
    pub stockpile: ResourceLedger,
    #[serde(default)]
    pub laborers: u32,
}
