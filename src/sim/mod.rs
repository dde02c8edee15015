//! Deterministic game core
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Time only through the injected scheduler
//! - Stable circle order (by ID)
//! - No rendering or platform dependencies

pub mod autoplay;
pub mod circle;
pub mod color;
pub mod scheduler;
pub mod snapshot;
pub mod state;

pub use autoplay::AutoPlayer;
pub use circle::{Bounds, Circle, topmost_hit};
pub use color::{Color, Language, PALETTE, random_color};
pub use scheduler::{Scheduler, Task, TimerHandle, TimerQueue, VirtualClock, WallClock};
pub use snapshot::{CircleView, Snapshot};
pub use state::{RoundPhase, RoundState, TapOutcome};
