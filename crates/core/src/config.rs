//! Generator configuration and its JSON file form.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use crate::error::GenerationError;
use crate::types::FloorVariant;

/// Smallest room size that still leaves a one-tile margin inside every leaf.
pub const MIN_ROOM_SIZE_FLOOR: u32 = 3;

/// Largest map side; split coordinates stay exactly representable below it.
pub const MAX_MAP_EXTENT: u32 = 16_384;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GeneratorConfig {
    pub map_width: u32,
    pub map_height: u32,
    pub min_room_size: u32,
    pub max_depth: u32,
    pub palette: TilePalette,
    pub prefabs: SpawnPrefabs,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            map_width: 64,
            map_height: 64,
            min_room_size: 6,
            max_depth: 4,
            palette: TilePalette::default(),
            prefabs: SpawnPrefabs::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn with_map_size(mut self, width: u32, height: u32) -> Self {
        self.map_width = width;
        self.map_height = height;
        self
    }

    pub fn with_min_room_size(mut self, min_room_size: u32) -> Self {
        self.min_room_size = min_room_size;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.map_width == 0 || self.map_height == 0 {
            return Err(GenerationError::InvalidConfig(format!(
                "map size {}x{} must be positive",
                self.map_width, self.map_height
            )));
        }
        if self.map_width > MAX_MAP_EXTENT || self.map_height > MAX_MAP_EXTENT {
            return Err(GenerationError::InvalidConfig(format!(
                "map size {}x{} exceeds {MAX_MAP_EXTENT}",
                self.map_width, self.map_height
            )));
        }
        if self.min_room_size < MIN_ROOM_SIZE_FLOOR {
            return Err(GenerationError::InvalidConfig(format!(
                "min_room_size {} is below {MIN_ROOM_SIZE_FLOOR}",
                self.min_room_size
            )));
        }
        if self.map_width < self.min_room_size || self.map_height < self.min_room_size {
            return Err(GenerationError::InvalidConfig(format!(
                "map size {}x{} is smaller than min_room_size {}",
                self.map_width, self.map_height, self.min_room_size
            )));
        }
        if self.palette.floor.is_empty() {
            return Err(GenerationError::InvalidConfig(
                "palette needs at least one floor tile".to_string(),
            ));
        }
        Ok(())
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }
}

/// Opaque tile identifiers handed through to the tile renderer.
///
/// Corridors always use `floor[0]`; rooms draw their variant from the rest.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TilePalette {
    pub floor: Vec<String>,
    pub wall: String,
}

impl Default for TilePalette {
    fn default() -> Self {
        Self {
            floor: ["floor_corridor", "floor_stone", "floor_tile", "floor_moss"]
                .iter()
                .map(|name| name.to_string())
                .collect(),
            wall: "wall".to_string(),
        }
    }
}

impl TilePalette {
    pub fn floor_tile(&self, variant: FloorVariant) -> Option<&str> {
        self.floor.get(variant.0).map(String::as_str)
    }
}

/// Entity identifiers attached to spawn points.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SpawnPrefabs {
    pub goal: String,
    pub researcher: String,
    pub enemy: String,
}

impl Default for SpawnPrefabs {
    fn default() -> Self {
        Self {
            goal: "goal".to_string(),
            researcher: "researcher".to_string(),
            enemy: "enemy".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_config_is_a_sixty_four_square_depth_four_map() {
        let config = GeneratorConfig::default();
        assert_eq!((config.map_width, config.map_height), (64, 64));
        assert_eq!(config.min_room_size, 6);
        assert_eq!(config.max_depth, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{ "map_width": 40, "max_depth": 2 }"#).expect("deserialize");
        assert_eq!(config.map_width, 40);
        assert_eq!(config.map_height, 64);
        assert_eq!(config.max_depth, 2);
        assert_eq!(config.palette, TilePalette::default());
    }

    #[test]
    fn config_atomic_write_and_load() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("generator.json");
        let config = GeneratorConfig::default().with_map_size(48, 32).with_max_depth(3);

        config.write_atomic(&path).expect("write");
        let loaded = GeneratorConfig::load(&path).expect("load");
        assert_eq!(config, loaded);

        let tmp_path = path.with_extension("json.tmp");
        assert!(!tmp_path.exists());
    }

    #[test]
    fn load_rejects_malformed_json() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").expect("write");

        let err = GeneratorConfig::load(&path).expect_err("malformed json should fail");
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn validate_rejects_unusable_sizes() {
        let zero = GeneratorConfig::default().with_map_size(0, 10);
        assert!(matches!(zero.validate(), Err(GenerationError::InvalidConfig(_))));

        let tiny_rooms = GeneratorConfig::default().with_min_room_size(2);
        assert!(matches!(tiny_rooms.validate(), Err(GenerationError::InvalidConfig(_))));

        let small_map = GeneratorConfig::default().with_map_size(5, 64);
        assert!(matches!(small_map.validate(), Err(GenerationError::InvalidConfig(_))));

        let huge_map = GeneratorConfig::default().with_map_size(MAX_MAP_EXTENT + 1, 64);
        assert!(matches!(huge_map.validate(), Err(GenerationError::InvalidConfig(_))));
        assert!(GeneratorConfig::default().with_map_size(MAX_MAP_EXTENT, 64).validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_floor_palette() {
        let mut config = GeneratorConfig::default();
        config.palette.floor.clear();
        let err = config.validate().expect_err("empty palette should fail");
        assert!(err.to_string().contains("floor tile"), "unexpected message: {err}");
    }

    #[test]
    fn palette_lookup_by_variant() {
        let palette = TilePalette::default();
        assert_eq!(palette.floor_tile(FloorVariant(0)), Some("floor_corridor"));
        assert_eq!(palette.floor_tile(FloorVariant(9)), None);
    }
}
