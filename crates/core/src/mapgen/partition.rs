//! Binary space partition of the map rectangle.

use serde::{Deserialize, Serialize};

use crate::types::Rect;

use super::seed::DungeonRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitAxis {
    /// Cut parallel to the x axis; children are stacked bottom/top.
    Horizontal,
    /// Cut parallel to the y axis; children sit left/right.
    Vertical,
}

/// A node of the partition tree. Either a leaf or exactly two children.
#[derive(Clone, Debug, PartialEq)]
pub struct PartitionNode {
    pub area: Rect,
    /// Set on leaves once rooms are placed.
    pub room: Option<Rect>,
    children: Option<Box<(PartitionNode, PartitionNode)>>,
    split: Option<SplitAxis>,
}

impl PartitionNode {
    pub fn leaf(area: Rect) -> Self {
        Self { area, room: None, children: None, split: None }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn children(&self) -> Option<(&PartitionNode, &PartitionNode)> {
        self.children.as_deref().map(|(left, right)| (left, right))
    }

    pub(super) fn children_mut(&mut self) -> Option<(&mut PartitionNode, &mut PartitionNode)> {
        self.children.as_deref_mut().map(|(left, right)| (left, right))
    }

    pub fn split_axis(&self) -> Option<SplitAxis> {
        self.split
    }

    /// Leaves in depth-first, left-before-right order.
    pub fn leaves(&self) -> Vec<&PartitionNode> {
        let mut leaves = Vec::new();
        collect_leaves(self, &mut leaves);
        leaves
    }

    pub fn leaf_count(&self) -> usize {
        match self.children() {
            Some((left, right)) => left.leaf_count() + right.leaf_count(),
            None => 1,
        }
    }

    /// Number of split levels below this node.
    pub fn height(&self) -> usize {
        match self.children() {
            Some((left, right)) => 1 + left.height().max(right.height()),
            None => 0,
        }
    }
}

fn collect_leaves<'a>(node: &'a PartitionNode, leaves: &mut Vec<&'a PartitionNode>) {
    match node.children() {
        Some((left, right)) => {
            collect_leaves(left, leaves);
            collect_leaves(right, leaves);
        }
        None => leaves.push(node),
    }
}

pub fn build_partition_tree(
    map: Rect,
    min_room_size: f32,
    max_depth: u32,
    rng: &mut DungeonRng,
) -> PartitionNode {
    let mut root = PartitionNode::leaf(map);
    split(&mut root, min_room_size, max_depth, rng);
    root
}

fn split(node: &mut PartitionNode, min_room_size: f32, depth: u32, rng: &mut DungeonRng) {
    let area = node.area;
    if depth == 0 || area.width < min_room_size * 2.0 || area.height < min_room_size * 2.0 {
        return;
    }

    // The coin is drawn even when the shape decides the axis.
    let mut axis = if rng.coin() { SplitAxis::Horizontal } else { SplitAxis::Vertical };
    if area.width > area.height {
        axis = SplitAxis::Vertical;
    } else if area.height > area.width {
        axis = SplitAxis::Horizontal;
    }

    let (start, end) = match axis {
        SplitAxis::Horizontal => (area.y, area.top()),
        SplitAxis::Vertical => (area.x, area.right()),
    };
    let offset = rng.range_f32(min_room_size, (end - start) - min_room_size);
    let cut = snap_cut(start + offset, start + min_room_size, end - min_room_size);

    // Both children share `cut`, so the left far edge is bit-equal to the right origin.
    let (left_area, right_area) = match axis {
        SplitAxis::Horizontal => (
            Rect::new(area.x, start, area.width, cut - start),
            Rect::new(area.x, cut, area.width, end - cut),
        ),
        SplitAxis::Vertical => (
            Rect::new(start, area.y, cut - start, area.height),
            Rect::new(cut, area.y, end - cut, area.height),
        ),
    };

    let mut left = PartitionNode::leaf(left_area);
    let mut right = PartitionNode::leaf(right_area);
    split(&mut left, min_room_size, depth - 1, rng);
    split(&mut right, min_room_size, depth - 1, rng);

    node.children = Some(Box::new((left, right)));
    node.split = Some(axis);
}

/// Resolution of split coordinates. Sums and differences of multiples of this
/// step are exact in `f32` for maps up to `MAX_MAP_EXTENT` cells wide.
const CUT_STEP: f32 = 1.0 / 256.0;

fn snap_cut(cut: f32, lowest: f32, highest: f32) -> f32 {
    ((cut / CUT_STEP).round() * CUT_STEP).max(lowest).min(highest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(width: f32, height: f32, min_room_size: f32, depth: u32, seed: u64) -> PartitionNode {
        let mut rng = DungeonRng::from_seed(seed);
        build_partition_tree(Rect::new(0.0, 0.0, width, height), min_room_size, depth, &mut rng)
    }

    #[test]
    fn zero_depth_keeps_single_leaf() {
        let root = tree(64.0, 64.0, 6.0, 0, 1);
        assert!(root.is_leaf());
        assert_eq!(root.leaf_count(), 1);
    }

    #[test]
    fn exact_double_min_size_splits_once_at_the_midline() {
        let root = tree(12.0, 12.0, 6.0, 4, 7);
        let (left, right) = root.children().expect("root should split");
        assert!(left.is_leaf() && right.is_leaf());
        match root.split_axis() {
            Some(SplitAxis::Horizontal) => {
                assert_eq!(left.area, Rect::new(0.0, 0.0, 12.0, 6.0));
                assert_eq!(right.area, Rect::new(0.0, 6.0, 12.0, 6.0));
            }
            Some(SplitAxis::Vertical) => {
                assert_eq!(left.area, Rect::new(0.0, 0.0, 6.0, 12.0));
                assert_eq!(right.area, Rect::new(6.0, 0.0, 6.0, 12.0));
            }
            None => panic!("split node must record its axis"),
        }
    }

    #[test]
    fn wide_areas_split_vertically_and_tall_areas_horizontally() {
        for seed in 0..16 {
            let wide = tree(80.0, 20.0, 6.0, 1, seed);
            assert_eq!(wide.split_axis(), Some(SplitAxis::Vertical));

            let tall = tree(20.0, 80.0, 6.0, 1, seed);
            assert_eq!(tall.split_axis(), Some(SplitAxis::Horizontal));
        }
    }

    #[test]
    fn square_areas_use_both_orientations_across_seeds() {
        let mut horizontal = 0;
        let mut vertical = 0;
        for seed in 0..64 {
            match tree(30.0, 30.0, 6.0, 1, seed).split_axis() {
                Some(SplitAxis::Horizontal) => horizontal += 1,
                Some(SplitAxis::Vertical) => vertical += 1,
                None => panic!("30x30 must split"),
            }
        }
        assert!(horizontal > 0 && vertical > 0, "h={horizontal} v={vertical}");
    }

    #[test]
    fn depth_bounds_tree_height_and_leaves_respect_min_size() {
        for seed in 0..32 {
            let root = tree(64.0, 64.0, 6.0, 4, seed);
            assert!(root.height() <= 4);
            assert!(root.leaf_count() <= 16);
            for leaf in root.leaves() {
                assert!(leaf.area.width >= 6.0 && leaf.area.height >= 6.0, "{:?}", leaf.area);
            }
        }
    }

    #[test]
    fn leaves_are_listed_left_before_right() {
        let root = tree(64.0, 20.0, 6.0, 1, 3);
        let leaves = root.leaves();
        assert_eq!(leaves.len(), 2);
        assert_eq!(leaves[0].area.x, 0.0);
        assert!(leaves[1].area.x > 0.0);
    }

    #[test]
    fn sibling_leaves_share_exact_edges() {
        for seed in 0..64 {
            let root = tree(97.0, 83.0, 5.0, 6, seed);
            let leaves: Vec<Rect> = root.leaves().iter().map(|leaf| leaf.area).collect();
            let total: f32 = leaves.iter().map(|area| area.area()).sum();
            assert!((total - 97.0 * 83.0).abs() < 0.5, "seed {seed}: leaf area {total}");
            for (index, area) in leaves.iter().enumerate() {
                assert!(area.right() <= 97.0 && area.top() <= 83.0, "seed {seed}: {area:?}");
                for other in &leaves[index + 1..] {
                    assert!(!area.overlaps(*other), "seed {seed}: {area:?} overlaps {other:?}");
                }
            }
        }
    }

    #[test]
    fn cuts_snap_inside_the_allowed_band() {
        assert_eq!(snap_cut(10.001, 6.0, 20.0), 10.0);
        assert_eq!(snap_cut(5.999, 6.0, 20.0), 6.0);
        assert_eq!(snap_cut(20.4, 6.0, 20.0), 20.0);
        assert_eq!(snap_cut(7.5, 6.0, 20.0), 7.5);
    }
}
