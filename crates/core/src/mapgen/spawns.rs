//! Spawn roles assigned to room centers.

use crate::error::GenerationError;
use crate::types::Rect;

use super::model::{SpawnPlan, SpawnPoint};
use super::seed::DungeonRng;

/// Player, goal, and researcher each need a room of their own.
pub const MIN_SPAWN_ROOMS: usize = 3;

/// Player in the first room, goal in the last, the researcher in a random
/// interior room, and one enemy in every other interior room.
pub fn place_spawns(rooms: &[Rect], rng: &mut DungeonRng) -> Result<SpawnPlan, GenerationError> {
    if rooms.len() < MIN_SPAWN_ROOMS {
        return Err(GenerationError::TooFewRooms { found: rooms.len() });
    }

    let last = rooms.len() - 1;
    let researcher_room = rng.range_usize(1, last);
    let spawn_in = |room: usize| SpawnPoint { room, pos: rooms[room].center() };

    Ok(SpawnPlan {
        player: spawn_in(0),
        goal: spawn_in(last),
        researcher: spawn_in(researcher_room),
        enemies: (1..last).filter(|&room| room != researcher_room).map(spawn_in).collect(),
    })
}
