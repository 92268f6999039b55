use serde::{Deserialize, Serialize};

/// Integer grid cell. Ordering is row-major (`y` first) so ordered sets of
/// cells iterate the same way on every run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self { y: self.y + dy, x: self.x + dx }
    }
}

/// Real-valued position, used for room centers and spawn points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Cell containing this point, truncating toward zero.
    pub fn to_cell(self) -> Pos {
        Pos::new(self.x as i32, self.y as i32)
    }
}

/// Axis-aligned rectangle with a real-valued origin and size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(self) -> f32 {
        self.x + self.width
    }

    pub fn top(self) -> f32 {
        self.y + self.height
    }

    pub fn center(self) -> Point {
        Point { x: self.x + self.width / 2.0, y: self.y + self.height / 2.0 }
    }

    pub fn area(self) -> f32 {
        self.width * self.height
    }

    /// True when `inner` fits inside `self` leaving at least `margin` on every side.
    pub fn contains_with_margin(self, inner: Rect, margin: f32) -> bool {
        inner.x >= self.x + margin
            && inner.y >= self.y + margin
            && inner.right() <= self.right() - margin
            && inner.top() <= self.top() - margin
    }

    /// Overlap of interiors; rectangles that only share an edge do not overlap.
    pub fn overlaps(self, other: Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.top()
            && other.y < self.top()
    }

    /// Grid cells covered by this rectangle, from the truncated origin up to
    /// (excluding) the truncated far edge.
    pub fn cells(self) -> impl Iterator<Item = Pos> {
        let from_x = self.x as i32;
        let to_x = self.right() as i32;
        let from_y = self.y as i32;
        let to_y = self.top() as i32;
        (from_y..to_y).flat_map(move |y| (from_x..to_x).map(move |x| Pos::new(x, y)))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Empty,
    Floor,
    Wall,
    Corner,
}

impl TileKind {
    pub fn is_wall(self) -> bool {
        matches!(self, Self::Wall | Self::Corner)
    }
}

/// Index into the configured floor palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FloorVariant(pub usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_cover_truncated_rectangle() {
        let rect = Rect::new(2.7, 1.2, 3.1, 2.0);
        let cells: Vec<Pos> = rect.cells().collect();
        // x: 2..5, y: 1..3
        assert_eq!(cells.len(), 6);
        assert_eq!(cells.first().copied(), Some(Pos::new(2, 1)));
        assert_eq!(cells.last().copied(), Some(Pos::new(4, 2)));
    }

    #[test]
    fn pos_orders_rows_before_columns() {
        assert!(Pos::new(9, 0) < Pos::new(0, 1));
    }

    #[test]
    fn margin_check_rejects_touching_edges() {
        let outer = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(outer.contains_with_margin(Rect::new(1.0, 1.0, 8.0, 8.0), 1.0));
        assert!(!outer.contains_with_margin(Rect::new(0.5, 1.0, 8.0, 8.0), 1.0));
        assert!(!outer.contains_with_margin(Rect::new(1.0, 1.0, 8.5, 8.0), 1.0));
    }
}
