use thiserror::Error;

/// Reasons a generation pass refuses to produce a layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("invalid generator config: {0}")]
    InvalidConfig(String),
    #[error("spawn placement needs at least 3 rooms, layout has {found}")]
    TooFewRooms { found: usize },
}
