//! Floor rasterization and wall/corner inference.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::{FloorVariant, Pos, Rect};

use super::grid::{DOWN, LEFT, RIGHT, UP, diagonal_neighbours, orthogonal_neighbours};
use super::seed::DungeonRng;

/// Corridors always use the first palette entry.
pub const CORRIDOR_VARIANT: FloorVariant = FloorVariant(0);

/// Wall cells derived from a floor set. The two sets are disjoint from each
/// other and from the floor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WallCells {
    /// Non-floor orthogonal neighbours of floor cells.
    pub edges: BTreeSet<Pos>,
    /// Diagonal cells filled in by the corner rule.
    pub corners: BTreeSet<Pos>,
}

impl WallCells {
    pub fn contains(&self, pos: &Pos) -> bool {
        self.edges.contains(pos) || self.corners.contains(pos)
    }

    pub fn len(&self) -> usize {
        self.edges.len() + self.corners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty() && self.corners.is_empty()
    }
}

/// Maps every floor cell to a palette variant. Corridor cells are laid first
/// and room cells overwrite them; each room draws one variant.
pub fn assign_floor_variants(
    rooms: &[Rect],
    corridors: &BTreeSet<Pos>,
    variant_count: usize,
    rng: &mut DungeonRng,
) -> BTreeMap<Pos, FloorVariant> {
    let mut floor: BTreeMap<Pos, FloorVariant> =
        corridors.iter().map(|&pos| (pos, CORRIDOR_VARIANT)).collect();

    for room in rooms {
        let variant = room_floor_variant(variant_count, rng);
        for pos in room.cells() {
            floor.insert(pos, variant);
        }
    }

    floor
}

/// Uniform in `[1, variant_count - 1)`; an empty range collapses to its lower bound.
fn room_floor_variant(variant_count: usize, rng: &mut DungeonRng) -> FloorVariant {
    let upper = variant_count.saturating_sub(1);
    FloorVariant(rng.range_usize(1.min(upper), upper))
}

/// Derives edge and corner walls around `floor`.
///
/// The corner rule looks at the floor cell's own orthogonal neighbours: when
/// any adjacent pair of them (right+up, left+up, right+down, left+down) are
/// both walls, every non-floor diagonal of that floor cell becomes a corner.
/// This fills more than the single diagonal between the pair.
pub fn infer_walls(floor: &BTreeSet<Pos>) -> WallCells {
    let mut edges = BTreeSet::new();
    for &pos in floor {
        edges.extend(orthogonal_neighbours(pos).filter(|neighbour| !floor.contains(neighbour)));
    }

    let mut corners = BTreeSet::new();
    for &pos in floor {
        let is_edge = |(dx, dy): (i32, i32)| edges.contains(&pos.offset(dx, dy));
        let forms_corner = (is_edge(RIGHT) && is_edge(UP))
            || (is_edge(LEFT) && is_edge(UP))
            || (is_edge(RIGHT) && is_edge(DOWN))
            || (is_edge(LEFT) && is_edge(DOWN));
        if !forms_corner {
            continue;
        }
        corners.extend(
            diagonal_neighbours(pos)
                .filter(|diagonal| !floor.contains(diagonal) && !edges.contains(diagonal)),
        );
    }

    WallCells { edges, corners }
}
