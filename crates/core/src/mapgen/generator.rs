//! Generation pipeline: partition, rooms, corridors, tiles, spawns.

use std::collections::BTreeSet;

use log::{debug, info};

use crate::config::GeneratorConfig;
use crate::error::GenerationError;
use crate::types::{Pos, Rect};

use super::corridors::route_corridors;
use super::model::{DungeonLayout, FloorTile};
use super::partition::{PartitionNode, build_partition_tree};
use super::rooms::place_rooms;
use super::seed::DungeonRng;
use super::spawns::place_spawns;
use super::tiles::{assign_floor_variants, infer_walls};

pub struct DungeonGenerator {
    config: GeneratorConfig,
}

impl DungeonGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, GenerationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn generate(&self, seed: u64) -> Result<DungeonLayout, GenerationError> {
        let mut rng = DungeonRng::from_seed(seed);
        let mut layout = self.generate_with_rng(&mut rng)?;
        layout.seed = Some(seed);
        Ok(layout)
    }

    /// Runs the whole pipeline against a caller-owned random stream.
    pub fn generate_with_rng(&self, rng: &mut DungeonRng) -> Result<DungeonLayout, GenerationError> {
        let min_room_size = self.config.min_room_size as f32;

        let mut tree = self.partition(rng);
        debug!("partitioned map into {} leaves (height {})", tree.leaf_count(), tree.height());

        let rooms = place_rooms(&mut tree, min_room_size, rng);
        debug!("placed {} rooms", rooms.len());

        let corridors = route_corridors(&rooms, rng);
        debug!("routed {} corridor cells", corridors.len());

        let floor = assign_floor_variants(&rooms, &corridors, self.config.palette.floor.len(), rng);
        let floor_cells: BTreeSet<Pos> = floor.keys().copied().collect();
        let walls = infer_walls(&floor_cells);
        debug!(
            "rasterized {} floor cells, {} edge walls, {} corner walls",
            floor.len(),
            walls.edges.len(),
            walls.corners.len()
        );

        let spawns = place_spawns(&rooms, rng)?;
        info!(
            "generated {}x{} dungeon: {} rooms, researcher in room {}, {} enemies",
            self.config.map_width,
            self.config.map_height,
            rooms.len(),
            spawns.researcher.room,
            spawns.enemies.len()
        );

        Ok(DungeonLayout {
            seed: None,
            map_width: self.config.map_width,
            map_height: self.config.map_height,
            rooms,
            corridors: corridors.into_iter().collect(),
            floor_tiles: floor.into_iter().map(|(pos, variant)| FloorTile { pos, variant }).collect(),
            walls: walls.edges.into_iter().collect(),
            corners: walls.corners.into_iter().collect(),
            spawns,
            palette: self.config.palette.clone(),
            prefabs: self.config.prefabs.clone(),
        })
    }

    /// First pipeline phase on its own; consumes the same draws `generate` does.
    pub fn partition(&self, rng: &mut DungeonRng) -> PartitionNode {
        let map = Rect::new(0.0, 0.0, self.config.map_width as f32, self.config.map_height as f32);
        build_partition_tree(map, self.config.min_room_size as f32, self.config.max_depth, rng)
    }
}
