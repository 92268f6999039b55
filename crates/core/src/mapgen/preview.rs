//! Text rendering of a layout for debugging, highest row first.

use crate::types::{Pos, TileKind};

use super::model::{DungeonLayout, SpawnRole};

pub fn render_ascii(layout: &DungeonLayout) -> String {
    let Some((min, max)) = layout.bounds() else {
        return String::new();
    };

    let width = (max.x - min.x + 1) as usize;
    let height = (max.y - min.y + 1) as usize;
    let mut rows = vec![vec![' '; width]; height];

    for y in min.y..=max.y {
        for x in min.x..=max.x {
            let glyph = match layout.classify(Pos::new(x, y)) {
                TileKind::Empty => ' ',
                TileKind::Floor => '.',
                TileKind::Wall => '#',
                TileKind::Corner => '+',
            };
            rows[(max.y - y) as usize][(x - min.x) as usize] = glyph;
        }
    }

    for (role, point) in layout.spawns.points() {
        let cell = point.pos.to_cell();
        if cell.x < min.x || cell.x > max.x || cell.y < min.y || cell.y > max.y {
            continue;
        }
        rows[(max.y - cell.y) as usize][(cell.x - min.x) as usize] = match role {
            SpawnRole::Player => '@',
            SpawnRole::Goal => 'G',
            SpawnRole::Researcher => 'R',
            SpawnRole::Enemy => 'e',
        };
    }

    let mut out = String::with_capacity((width + 1) * height);
    for row in rows {
        let line: String = row.into_iter().collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
