pub mod config;
pub mod error;
pub mod mapgen;
pub mod types;

pub use config::{GeneratorConfig, SpawnPrefabs, TilePalette};
pub use error::GenerationError;
pub use mapgen::{DungeonGenerator, DungeonLayout, DungeonRng, generate_layout, render_ascii};
pub use types::*;
