use std::io;
use std::path::PathBuf;

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use super::context::TickContext;
use super::system::{SimSystem, TickFrequency};
use crate::flush::flush_to_jsonl;
use crate::model::timestamp::{DAYS_PER_MONTH, DAYS_PER_YEAR, MONTHS_PER_YEAR};
use crate::model::{SimTimestamp, World};

/// Configuration for a simulation run.
pub struct SimConfig {
    pub start_year: u32,
    pub num_years: u32,
    pub seed: u64,
    /// If set, flush world state every N years.
    pub flush_interval: Option<u32>,
    /// Directory to write flush checkpoints into.
    pub output_dir: Option<PathBuf>,
}

impl SimConfig {
    pub fn new(start_year: u32, num_years: u32, seed: u64) -> Self {
        Self {
            start_year,
            num_years,
            seed,
            flush_interval: None,
            output_dir: None,
        }
    }
}

/// Returns true if a system with the given frequency should fire at this timestamp.
pub fn should_fire(freq: TickFrequency, time: SimTimestamp) -> bool {
    match freq {
        TickFrequency::Daily => true,
        TickFrequency::Monthly => time.day_of_month() == 1,
        TickFrequency::Yearly => time.day() == 1,
    }
}

/// Set `world.current_time` and call each system whose frequency matches.
///
/// Signal delivery is **single-pass, non-cascading**:
///
/// 1. **Phase 1 (tick):** Each system's `tick()` runs in registration order.
///    All signals emitted during this phase are collected into a shared buffer.
/// 2. **Phase 2 (react):** If any signals were emitted, each system's
///    `handle_signals()` is called with the full signal buffer as `ctx.inbox`.
///    Systems may mutate the world and push new signals during this phase,
///    but those new signals are **not** delivered — they are discarded at the
///    end of the dispatch cycle.
///
/// A signal emitted in Phase 2 therefore never triggers further reactions
/// within the same tick; a reaction that needs to propagate should mutate
/// world state that a later tick's Phase 1 will observe.
pub fn dispatch_systems(
    world: &mut World,
    systems: &mut [Box<dyn SimSystem>],
    rng: &mut dyn RngCore,
    time: SimTimestamp,
) {
    world.current_time = time;

    // Phase 1: tick systems, collecting signals
    let mut signals = Vec::new();
    for system in systems.iter_mut() {
        if should_fire(system.frequency(), time) {
            let mut ctx = TickContext {
                world,
                rng,
                signals: &mut signals,
                inbox: &[],
            };
            system.tick(&mut ctx);
        }
    }

    // Phase 2: deliver signals for reaction (only if any were emitted)
    if !signals.is_empty() {
        for system in systems.iter_mut() {
            if should_fire(system.frequency(), time) {
                let mut new_signals = Vec::new();
                let mut ctx = TickContext {
                    world,
                    rng,
                    signals: &mut new_signals,
                    inbox: &signals,
                };
                system.handle_signals(&mut ctx);
            }
        }
    }
}

/// Run the simulation for the configured number of years.
///
/// Creates a deterministic RNG from `config.seed`, so the same seed always
/// produces the same simulation. The loop iterates at the finest granularity
/// needed by any registered system, avoiding wasted cycles when all systems
/// are coarse.
pub fn run(
    world: &mut World,
    systems: &mut [Box<dyn SimSystem>],
    config: SimConfig,
) -> io::Result<()> {
    if systems.is_empty() || config.num_years == 0 {
        return Ok(());
    }

    let mut rng = SmallRng::seed_from_u64(config.seed);
    let finest = systems.iter().map(|s| s.frequency()).max().unwrap();

    for year_offset in 0..config.num_years {
        let year = config.start_year + year_offset;
        match finest {
            TickFrequency::Yearly => {
                dispatch_systems(world, systems, &mut rng, SimTimestamp::from_year(year));
            }
            TickFrequency::Monthly => {
                for month in 1..=MONTHS_PER_YEAR {
                    let day = (month - 1) * DAYS_PER_MONTH + 1;
                    dispatch_systems(world, systems, &mut rng, SimTimestamp::new(year, day));
                }
            }
            TickFrequency::Daily => {
                for day in 1..=DAYS_PER_YEAR {
                    dispatch_systems(world, systems, &mut rng, SimTimestamp::new(year, day));
                }
            }
        }

        // Flush checkpoint at configured interval
        if let (Some(interval), Some(dir)) = (config.flush_interval, &config.output_dir) {
            let is_last_year = year_offset == config.num_years - 1;
            if is_last_year || (year_offset > 0 && (year_offset + 1) % interval == 0) {
                let checkpoint_dir = dir.join(format!("year_{year:06}"));
                flush_to_jsonl(world, &checkpoint_dir)?;
            }
        }
    }
    Ok(())
}
