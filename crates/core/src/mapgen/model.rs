//! Public data models for generated dungeon layouts and their spawn plans.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use xxhash_rust::xxh3::xxh3_64;

use crate::config::{SpawnPrefabs, TilePalette};
use crate::types::{FloorVariant, Point, Pos, Rect, TileKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SpawnRole {
    Player,
    Goal,
    Researcher,
    Enemy,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    /// Index into `DungeonLayout::rooms`.
    pub room: usize,
    pub pos: Point,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnPlan {
    pub player: SpawnPoint,
    pub goal: SpawnPoint,
    pub researcher: SpawnPoint,
    pub enemies: Vec<SpawnPoint>,
}

impl SpawnPlan {
    pub fn points(&self) -> impl Iterator<Item = (SpawnRole, &SpawnPoint)> {
        [
            (SpawnRole::Player, &self.player),
            (SpawnRole::Goal, &self.goal),
            (SpawnRole::Researcher, &self.researcher),
        ]
        .into_iter()
        .chain(self.enemies.iter().map(|enemy| (SpawnRole::Enemy, enemy)))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorTile {
    pub pos: Pos,
    pub variant: FloorVariant,
}

/// An entity the instantiation collaborator should create.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntitySpawn {
    pub role: SpawnRole,
    pub prefab: String,
    pub pos: Point,
}

/// One generation pass, handed to downstream collaborators as read-only data.
///
/// All cell lists are sorted in row-major order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DungeonLayout {
    pub seed: Option<u64>,
    pub map_width: u32,
    pub map_height: u32,
    pub rooms: Vec<Rect>,
    pub corridors: Vec<Pos>,
    pub floor_tiles: Vec<FloorTile>,
    pub walls: Vec<Pos>,
    pub corners: Vec<Pos>,
    pub spawns: SpawnPlan,
    pub palette: TilePalette,
    pub prefabs: SpawnPrefabs,
}

impl DungeonLayout {
    pub fn classify(&self, pos: Pos) -> TileKind {
        if self.floor_tiles.binary_search_by_key(&pos, |tile| tile.pos).is_ok() {
            TileKind::Floor
        } else if self.walls.binary_search(&pos).is_ok() {
            TileKind::Wall
        } else if self.corners.binary_search(&pos).is_ok() {
            TileKind::Corner
        } else {
            TileKind::Empty
        }
    }

    pub fn floor_variant(&self, pos: Pos) -> Option<FloorVariant> {
        self.floor_tiles
            .binary_search_by_key(&pos, |tile| tile.pos)
            .ok()
            .map(|index| self.floor_tiles[index].variant)
    }

    /// Edge walls and corner walls together.
    pub fn wall_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.walls.iter().chain(&self.corners).copied()
    }

    /// Inclusive bounding box of every classified cell, or `None` for an empty layout.
    pub fn bounds(&self) -> Option<(Pos, Pos)> {
        let mut cells = self.floor_tiles.iter().map(|tile| tile.pos).chain(self.wall_cells());
        let first = cells.next()?;
        Some(cells.fold((first, first), |(min, max), pos| {
            (
                Pos::new(min.x.min(pos.x), min.y.min(pos.y)),
                Pos::new(max.x.max(pos.x), max.y.max(pos.y)),
            )
        }))
    }

    /// Goal, researcher, and enemy entities with their configured prefabs.
    /// The player already exists and is only moved, so it is not listed.
    pub fn entity_spawns(&self) -> Vec<EntitySpawn> {
        let mut spawns = vec![
            EntitySpawn {
                role: SpawnRole::Goal,
                prefab: self.prefabs.goal.clone(),
                pos: self.spawns.goal.pos,
            },
            EntitySpawn {
                role: SpawnRole::Researcher,
                prefab: self.prefabs.researcher.clone(),
                pos: self.spawns.researcher.pos,
            },
        ];
        spawns.extend(self.spawns.enemies.iter().map(|enemy| EntitySpawn {
            role: SpawnRole::Enemy,
            prefab: self.prefabs.enemy.clone(),
            pos: enemy.pos,
        }));
        spawns
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        fn push_pos(bytes: &mut Vec<u8>, pos: Pos) {
            bytes.extend(pos.y.to_le_bytes());
            bytes.extend(pos.x.to_le_bytes());
        }
        fn push_point(bytes: &mut Vec<u8>, point: Point) {
            bytes.extend(point.x.to_bits().to_le_bytes());
            bytes.extend(point.y.to_bits().to_le_bytes());
        }

        let mut bytes = Vec::new();
        bytes.extend(self.map_width.to_le_bytes());
        bytes.extend(self.map_height.to_le_bytes());

        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            for value in [room.x, room.y, room.width, room.height] {
                bytes.extend(value.to_bits().to_le_bytes());
            }
        }

        bytes.extend((self.corridors.len() as u32).to_le_bytes());
        for &pos in &self.corridors {
            push_pos(&mut bytes, pos);
        }

        bytes.extend((self.floor_tiles.len() as u32).to_le_bytes());
        for tile in &self.floor_tiles {
            push_pos(&mut bytes, tile.pos);
            bytes.extend((tile.variant.0 as u32).to_le_bytes());
        }

        bytes.extend((self.walls.len() as u32).to_le_bytes());
        for &pos in &self.walls {
            push_pos(&mut bytes, pos);
        }
        bytes.extend((self.corners.len() as u32).to_le_bytes());
        for &pos in &self.corners {
            push_pos(&mut bytes, pos);
        }

        bytes.extend((self.spawns.enemies.len() as u32).to_le_bytes());
        for (role, point) in self.spawns.points() {
            bytes.push(match role {
                SpawnRole::Player => 0,
                SpawnRole::Goal => 1,
                SpawnRole::Researcher => 2,
                SpawnRole::Enemy => 3,
            });
            bytes.extend((point.room as u32).to_le_bytes());
            push_point(&mut bytes, point.pos);
        }

        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
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
        let layout: Self = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tiny_layout() -> DungeonLayout {
        let center = |room: usize, x: f32| SpawnPoint { room, pos: Point { x, y: 2.5 } };
        DungeonLayout {
            seed: Some(7),
            map_width: 8,
            map_height: 5,
            rooms: vec![Rect::new(1.0, 1.0, 3.0, 3.0)],
            corridors: vec![Pos::new(4, 2)],
            floor_tiles: vec![
                FloorTile { pos: Pos::new(1, 1), variant: FloorVariant(1) },
                FloorTile { pos: Pos::new(4, 2), variant: FloorVariant(0) },
            ],
            walls: vec![Pos::new(0, 1), Pos::new(5, 2)],
            corners: vec![Pos::new(0, 0)],
            spawns: SpawnPlan {
                player: center(0, 1.5),
                goal: center(2, 6.5),
                researcher: center(1, 4.5),
                enemies: vec![center(3, 7.5)],
            },
            palette: TilePalette::default(),
            prefabs: SpawnPrefabs::default(),
        }
    }

    #[test]
    fn classify_reports_each_tile_kind() {
        let layout = tiny_layout();
        assert_eq!(layout.classify(Pos::new(1, 1)), TileKind::Floor);
        assert_eq!(layout.classify(Pos::new(5, 2)), TileKind::Wall);
        assert_eq!(layout.classify(Pos::new(0, 0)), TileKind::Corner);
        assert_eq!(layout.classify(Pos::new(7, 4)), TileKind::Empty);
        assert_eq!(layout.floor_variant(Pos::new(4, 2)), Some(FloorVariant(0)));
        assert_eq!(layout.floor_variant(Pos::new(0, 0)), None);
    }

    #[test]
    fn bounds_cover_floor_and_walls() {
        let layout = tiny_layout();
        assert_eq!(layout.bounds(), Some((Pos::new(0, 0), Pos::new(5, 2))));
    }

    #[test]
    fn entity_spawns_skip_player_and_attach_prefabs() {
        let spawns = tiny_layout().entity_spawns();
        let roles: Vec<SpawnRole> = spawns.iter().map(|spawn| spawn.role).collect();
        assert_eq!(roles, [SpawnRole::Goal, SpawnRole::Researcher, SpawnRole::Enemy]);
        assert_eq!(spawns[2].prefab, "enemy");
    }

    #[test]
    fn fingerprint_tracks_content() {
        let layout = tiny_layout();
        let mut moved = layout.clone();
        moved.spawns.goal.pos.x += 1.0;
        assert_eq!(layout.fingerprint(), tiny_layout().fingerprint());
        assert_ne!(layout.fingerprint(), moved.fingerprint());
    }

    #[test]
    fn layout_atomic_write_and_load() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("out").join("layout.json");
        let layout = tiny_layout();

        layout.write_atomic(&path).expect("write");
        let loaded = DungeonLayout::load(&path).expect("load");
        assert_eq!(layout, loaded);
        assert!(!path.with_extension("json.tmp").exists());
    }
}
