//! Color Rush - tap the circles that match the target color
//!
//! Core modules:
//! - `sim`: Deterministic round logic (geometry, spawning, scoring)
//! - `game`: Driver tying the round to a scheduler and a platform
//! - `platform`: Presentation adapter contract
//! - `settings`: Rule tuning and label language

pub mod error;
pub mod game;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use game::Game;
pub use platform::PresentationAdapter;
pub use settings::{Rules, Settings};

/// Game configuration constants
pub mod consts {
    /// Spawn interval at round start (ms)
    pub const INITIAL_SPAWN_INTERVAL_MS: u64 = 2000;
    /// Lowest spawn interval the speed-up can reach (ms)
    pub const MIN_SPAWN_INTERVAL_MS: u64 = 1;
    /// Interval multiplier per speed-up step
    pub const SPEEDUP_FACTOR: f64 = 0.8;
    /// Speed up every this many points
    pub const SPEEDUP_EVERY: u32 = 50;
    /// Points per correct tap
    pub const POINTS_PER_HIT: u32 = 10;

    /// Circle radius in surface pixels
    pub const CIRCLE_RADIUS: f32 = 60.0;

    /// Default demo surface (portrait phone)
    pub const DEMO_WIDTH: f32 = 1080.0;
    pub const DEMO_HEIGHT: f32 = 1920.0;
}
