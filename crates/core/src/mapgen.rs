//! Procedural dungeon generation split into one submodule per pipeline phase.

pub mod grid;
pub mod model;

mod corridors;
mod generator;
mod partition;
mod preview;
mod rooms;
mod seed;
mod spawns;
mod tiles;

pub use corridors::route_corridors;
pub use generator::DungeonGenerator;
pub use model::{DungeonLayout, EntitySpawn, FloorTile, SpawnPlan, SpawnPoint, SpawnRole};
pub use partition::{PartitionNode, SplitAxis, build_partition_tree};
pub use preview::render_ascii;
pub use rooms::place_rooms;
pub use seed::DungeonRng;
pub use spawns::{MIN_SPAWN_ROOMS, place_spawns};
pub use tiles::{CORRIDOR_VARIANT, WallCells, assign_floor_variants, infer_walls};

use crate::config::GeneratorConfig;
use crate::error::GenerationError;

pub fn generate_layout(config: GeneratorConfig, seed: u64) -> Result<DungeonLayout, GenerationError> {
    DungeonGenerator::new(config)?.generate(seed)
}
