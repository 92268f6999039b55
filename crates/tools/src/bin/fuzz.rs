use std::collections::BTreeSet;

use anyhow::{Result, bail};
use clap::Parser;
use dungeon_core::mapgen::grid::{diagonal_neighbours, has_floor_route, orthogonal_neighbours};
use dungeon_core::mapgen::{DungeonGenerator, DungeonLayout, DungeonRng};
use dungeon_core::{GenerationError, GeneratorConfig, Pos};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    runs: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("Starting layout fuzz on seed {} for {} runs...", args.seed, args.runs);
    let mut picker = DungeonRng::from_seed(args.seed);

    let mut rejected = 0_u32;
    for run in 0..args.runs {
        let config = GeneratorConfig::default()
            .with_map_size(picker.range_usize(24, 129) as u32, picker.range_usize(24, 129) as u32)
            .with_min_room_size(picker.range_usize(3, 9) as u32)
            .with_max_depth(picker.range_usize(1, 7) as u32);
        let layout_seed = picker.next_seed();

        let generator = DungeonGenerator::new(config)?;
        let layout = match generator.generate(layout_seed) {
            Ok(layout) => layout,
            Err(GenerationError::TooFewRooms { .. }) => {
                rejected += 1;
                continue;
            }
            Err(other) => return Err(other.into()),
        };

        if let Err(violation) = check_invariants(&generator, &layout, layout_seed) {
            bail!(
                "run {run}: seed {layout_seed} with {:?} broke an invariant: {violation}",
                generator.config()
            );
        }
    }

    println!(
        "Fuzzing completed successfully ({} layouts checked, {} rejected for too few rooms).",
        args.runs - rejected,
        rejected
    );
    Ok(())
}

fn check_invariants(
    generator: &DungeonGenerator,
    layout: &DungeonLayout,
    seed: u64,
) -> Result<(), String> {
    let tree = generator.partition(&mut DungeonRng::from_seed(seed));
    let leaves = tree.leaves();
    if leaves.len() != layout.rooms.len() {
        return Err(format!("{} leaves but {} rooms", leaves.len(), layout.rooms.len()));
    }
    for (leaf, room) in leaves.iter().zip(&layout.rooms) {
        if !leaf.area.contains_with_margin(*room, 1.0 - 1e-3) {
            return Err(format!("room {room:?} escapes leaf {:?}", leaf.area));
        }
    }

    let floor: BTreeSet<Pos> = layout.floor_tiles.iter().map(|tile| tile.pos).collect();
    for pair in layout.rooms.windows(2) {
        let (start, end) = (pair[0].center().to_cell(), pair[1].center().to_cell());
        if !has_floor_route(&floor, start, end) {
            return Err(format!("no corridor route from {start:?} to {end:?}"));
        }
    }

    for wall in layout.wall_cells() {
        if floor.contains(&wall) {
            return Err(format!("wall {wall:?} is also floor"));
        }
        let touches_floor =
            orthogonal_neighbours(wall).chain(diagonal_neighbours(wall)).any(|pos| floor.contains(&pos));
        if !touches_floor {
            return Err(format!("wall {wall:?} does not touch floor"));
        }
    }

    let occupied: BTreeSet<usize> = layout.spawns.points().map(|(_, point)| point.room).collect();
    if occupied.len() != layout.rooms.len() {
        return Err(format!("{} spawn rooms for {} rooms", occupied.len(), layout.rooms.len()));
    }

    Ok(())
}
