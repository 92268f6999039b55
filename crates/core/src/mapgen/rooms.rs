//! One room per partition leaf.

use log::warn;

use crate::types::Rect;

use super::partition::PartitionNode;
use super::seed::DungeonRng;

/// Margin kept between a room and the edge of its leaf.
const ROOM_MARGIN: f32 = 1.0;

/// Places a room in every leaf and returns them in depth-first order.
pub fn place_rooms(root: &mut PartitionNode, min_room_size: f32, rng: &mut DungeonRng) -> Vec<Rect> {
    let mut rooms = Vec::new();
    place_rooms_in(root, min_room_size, rng, &mut rooms);
    rooms
}

fn place_rooms_in(
    node: &mut PartitionNode,
    min_room_size: f32,
    rng: &mut DungeonRng,
    rooms: &mut Vec<Rect>,
) {
    if let Some((left, right)) = node.children_mut() {
        place_rooms_in(left, min_room_size, rng, rooms);
        place_rooms_in(right, min_room_size, rng, rooms);
        return;
    }

    let room = room_within(node.area, min_room_size, rng);
    node.room = Some(room);
    rooms.push(room);
}

fn room_within(area: Rect, min_room_size: f32, rng: &mut DungeonRng) -> Rect {
    let (min_width, max_width) = dimension_range(area.width, min_room_size);
    let (min_height, max_height) = dimension_range(area.height, min_room_size);
    if min_width < min_room_size || min_height < min_room_size {
        warn!(
            "leaf {:?} is too small for min room size {min_room_size}, clamped to {max_width}x{max_height}",
            area
        );
    }

    let width = rng.range_f32(min_width, max_width);
    let height = rng.range_f32(min_height, max_height);
    let x = rng.range_f32(area.x + ROOM_MARGIN, area.right() - width - ROOM_MARGIN);
    let y = rng.range_f32(area.y + ROOM_MARGIN, area.top() - height - ROOM_MARGIN);
    Rect::new(x, y, width, height)
}

/// Room size bounds for a leaf extent. The upper bound keeps the margin on
/// both sides (never below 1); the lower bound never exceeds the upper one.
fn dimension_range(extent: f32, min_room_size: f32) -> (f32, f32) {
    let upper = (extent - 2.0 * ROOM_MARGIN).max(1.0);
    (min_room_size.min(upper), upper)
}
