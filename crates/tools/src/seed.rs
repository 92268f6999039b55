use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use dungeon_core::DungeonRng;

/// Seed a layout is generated from, and whether the user picked it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutSeed {
    pub value: u64,
    pub from_cli: bool,
}

impl LayoutSeed {
    pub fn resolve(cli_seed: Option<u64>) -> Self {
        match cli_seed {
            Some(value) => Self { value, from_cli: true },
            None => Self { value: runtime_seed(), from_cli: false },
        }
    }
}

// Clock and pid are only entropy; the ChaCha stream spreads them over all 64 bits.
fn runtime_seed() -> u64 {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |elapsed| elapsed.as_nanos());
    let entropy = (nanos as u64) ^ u64::from(process::id()).rotate_left(32);
    DungeonRng::from_seed(entropy).next_seed()
}
