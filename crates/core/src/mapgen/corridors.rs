//! L-shaped, three-tile-wide corridors chaining consecutive rooms.

use std::collections::BTreeSet;

use crate::types::{Pos, Rect};

use super::seed::DungeonRng;

/// Cells on each side of a corridor's center line.
const CORRIDOR_HALF_WIDTH: i32 = 1;

/// Connects `rooms[i]` to `rooms[i + 1]` for every consecutive pair.
pub fn route_corridors(rooms: &[Rect], rng: &mut DungeonRng) -> BTreeSet<Pos> {
    let mut cells = BTreeSet::new();
    for pair in rooms.windows(2) {
        let start = pair[0].center().to_cell();
        let end = pair[1].center().to_cell();
        let horizontal_first = rng.coin();
        carve_l_shaped_corridor(&mut cells, start, end, horizontal_first);
    }
    cells
}

pub(super) fn carve_l_shaped_corridor(
    cells: &mut BTreeSet<Pos>,
    start: Pos,
    end: Pos,
    horizontal_first: bool,
) {
    if horizontal_first {
        carve_horizontal_line(cells, start.y, start.x, end.x);
        carve_vertical_line(cells, end.x, start.y, end.y);
    } else {
        carve_vertical_line(cells, start.x, start.y, end.y);
        carve_horizontal_line(cells, end.y, start.x, end.x);
    }
}

fn carve_horizontal_line(cells: &mut BTreeSet<Pos>, y: i32, left_x: i32, right_x: i32) {
    for x in left_x.min(right_x)..=left_x.max(right_x) {
        for offset in -CORRIDOR_HALF_WIDTH..=CORRIDOR_HALF_WIDTH {
            cells.insert(Pos::new(x, y + offset));
        }
    }
}

fn carve_vertical_line(cells: &mut BTreeSet<Pos>, x: i32, bottom_y: i32, top_y: i32) {
    for y in bottom_y.min(top_y)..=bottom_y.max(top_y) {
        for offset in -CORRIDOR_HALF_WIDTH..=CORRIDOR_HALF_WIDTH {
            cells.insert(Pos::new(x + offset, y));
        }
    }
}
