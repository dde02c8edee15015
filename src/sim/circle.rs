//! Circle geometry
//!
//! A circle is placed once at spawn time and never moves. Hit testing uses
//! squared distances with an inclusive boundary.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::color::Color;

/// Playable surface size, supplied by the platform at each spawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Random center such that the whole circle stays inside the bounds.
    ///
    /// An axis shorter than the circle's diameter centers the circle on that axis.
    /// A NaN or infinite axis pins the circle to that axis's near edge.
    pub fn random_center<R: Rng>(&self, radius: f32, rng: &mut R) -> Vec2 {
        Vec2::new(
            random_coord(self.width, radius, rng),
            random_coord(self.height, radius, rng),
        )
    }
}

fn random_coord<R: Rng>(extent: f32, radius: f32, rng: &mut R) -> f32 {
    if !extent.is_finite() {
        return radius;
    }
    let span = extent - radius * 2.0;
    if span <= 0.0 {
        return extent.max(0.0) / 2.0;
    }
    (rng.random::<f32>() * span + radius).clamp(radius, extent - radius)
}

/// A spawned circle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Stable arena ID (monotonic within a game)
    pub id: u32,
    pub color: Color,
    pub pos: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(id: u32, color: Color, pos: Vec2, radius: f32) -> Self {
        Self {
            id,
            color,
            pos,
            radius,
        }
    }

    /// Place a circle at a random in-bounds position
    pub fn spawn<R: Rng>(id: u32, color: Color, radius: f32, bounds: Bounds, rng: &mut R) -> Self {
        let pos = bounds.random_center(radius, rng);
        Self::new(id, color, pos, radius)
    }

    /// Check if a point lies inside the circle (boundary included)
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        self.pos.distance_squared(point) <= self.radius * self.radius
    }
}

/// Newest circle containing the point.
///
/// `circles` is kept in spawn order (ascending ID), so the search runs back to
/// front. The newest circle is drawn on top.
pub fn topmost_hit(circles: &[Circle], point: Vec2) -> Option<&Circle> {
    circles.iter().rev().find(|c| c.contains(point))
}
