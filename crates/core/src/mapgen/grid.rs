//! Neighbourhood offsets and connectivity queries over sets of cells.

use std::collections::{BTreeSet, VecDeque};

use crate::types::Pos;

pub const RIGHT: (i32, i32) = (1, 0);
pub const LEFT: (i32, i32) = (-1, 0);
pub const UP: (i32, i32) = (0, 1);
pub const DOWN: (i32, i32) = (0, -1);

pub const ORTHOGONAL: [(i32, i32); 4] = [RIGHT, LEFT, UP, DOWN];

pub const DIAGONAL: [(i32, i32); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

pub fn orthogonal_neighbours(pos: Pos) -> impl Iterator<Item = Pos> {
    ORTHOGONAL.into_iter().map(move |(dx, dy)| pos.offset(dx, dy))
}

pub fn diagonal_neighbours(pos: Pos) -> impl Iterator<Item = Pos> {
    DIAGONAL.into_iter().map(move |(dx, dy)| pos.offset(dx, dy))
}

/// True when `goal` is reachable from `start` stepping orthogonally through `floor`.
pub fn has_floor_route(floor: &BTreeSet<Pos>, start: Pos, goal: Pos) -> bool {
    if !floor.contains(&start) || !floor.contains(&goal) {
        return false;
    }
    if start == goal {
        return true;
    }

    let mut open = VecDeque::from([start]);
    let mut seen = BTreeSet::from([start]);
    while let Some(pos) = open.pop_front() {
        for next in orthogonal_neighbours(pos) {
            if !floor.contains(&next) || !seen.insert(next) {
                continue;
            }
            if next == goal {
                return true;
            }
            open.push_back(next);
        }
    }

    false
}
