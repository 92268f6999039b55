use anyhow::{Context, Result};
use clap::Parser;
use dungeon_core::{DungeonGenerator, GeneratorConfig, render_ascii};
use log::info;
use std::path::PathBuf;

mod seed;

use seed::LayoutSeed;

#[derive(Parser)]
#[command(author, version, about = "Generate a BSP dungeon layout", long_about = None)]
struct Args {
    /// Seed for the layout; a runtime seed is generated when omitted
    #[arg(short, long)]
    seed: Option<u64>,
    /// JSON generator config; missing fields use the defaults
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    width: Option<u32>,
    #[arg(long)]
    height: Option<u32>,
    #[arg(long)]
    min_room_size: Option<u32>,
    #[arg(long)]
    max_depth: Option<u32>,
    /// Write the layout as JSON to this path
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Print an ASCII preview of the layout
    #[arg(long)]
    preview: bool,
}

impl Args {
    fn resolve_config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?,
            None => GeneratorConfig::default(),
        };
        if let Some(width) = self.width {
            config.map_width = width;
        }
        if let Some(height) = self.height {
            config.map_height = height;
        }
        if let Some(min_room_size) = self.min_room_size {
            config.min_room_size = min_room_size;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = args.resolve_config()?;
    let seed = LayoutSeed::resolve(args.seed);
    info!("using seed {} (from cli: {})", seed.value, seed.from_cli);

    let generator = DungeonGenerator::new(config).context("Invalid generator config")?;
    let layout = generator
        .generate(seed.value)
        .with_context(|| format!("Generation failed for seed {}", seed.value))?;

    println!("Seed: {}", seed.value);
    println!("Rooms: {}", layout.rooms.len());
    println!("Corridor cells: {}", layout.corridors.len());
    println!("Floor cells: {}", layout.floor_tiles.len());
    println!("Wall cells: {} ({} corners)", layout.walls.len() + layout.corners.len(), layout.corners.len());
    println!("Enemies: {}", layout.spawns.enemies.len());
    println!("Fingerprint: {:016x}", layout.fingerprint());

    if args.preview {
        println!();
        print!("{}", render_ascii(&layout));
    }

    if let Some(path) = &args.output {
        layout
            .write_atomic(path)
            .with_context(|| format!("Failed to write layout file: {}", path.display()))?;
        println!("Layout written to {}", path.display());
    }

    Ok(())
}
