//! Configuration errors
//!
//! Gameplay never fails: bad taps are outcomes, not errors. Only a broken
//! rule set is rejected, once, before the first round starts.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Palette must contain at least one color")]
    EmptyPalette,

    #[error("Circle radius must be positive, got {0}")]
    InvalidRadius(f32),

    #[error("Initial spawn interval must be positive")]
    ZeroSpawnInterval,

    #[error("Minimum spawn interval {min} ms exceeds initial interval {initial} ms")]
    FloorAboveInitial { min: u64, initial: u64 },

    #[error("Speed-up factor must be in (0, 1], got {0}")]
    InvalidSpeedup(f64),

    #[error("Points per hit must be positive")]
    ZeroPoints,

    #[error("Speed-up threshold must be a positive multiple of points per hit, got {0}")]
    InvalidThreshold(u32),

    #[error("Settings parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
