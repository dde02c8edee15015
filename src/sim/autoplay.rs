//! Idle/demo mode player
//!
//! Looks at a snapshot the way a player would and decides where to tap.
//! Deterministic for a given seed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::snapshot::Snapshot;

/// Simple bot that taps the newest target circle, sometimes missing
#[derive(Debug, Clone)]
pub struct AutoPlayer {
    /// Chance (0-1) of tapping a wrong color when one is on screen
    pub mistake_rate: f32,
    rng: Pcg32,
}

impl AutoPlayer {
    pub fn new(seed: u64, mistake_rate: f32) -> Self {
        Self {
            mistake_rate: mistake_rate.clamp(0.0, 1.0),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Pick a tap point, or None to wait
    pub fn choose_tap(&mut self, snapshot: &Snapshot) -> Option<Vec2> {
        if !snapshot.in_progress {
            return None;
        }

        let (matching, wrong): (Vec<_>, Vec<_>) = snapshot
            .circles
            .iter()
            .partition(|c| c.color == snapshot.target_color);

        if !wrong.is_empty() && self.rng.random::<f32>() < self.mistake_rate {
            let c = wrong[self.rng.random_range(0..wrong.len())];
            return Some(Vec2::new(c.x, c.y));
        }

        // Newest first, matching what's drawn on top
        matching.last().map(|c| Vec2::new(c.x, c.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Color;
    use crate::sim::snapshot::CircleView;

    fn view(id: u32, color: Color, x: f32) -> CircleView {
        CircleView {
            id,
            x,
            y: 100.0,
            radius: 60.0,
            color,
            rgb: color.rgb(),
        }
    }

    fn snapshot(circles: Vec<CircleView>, target: Color, in_progress: bool) -> Snapshot {
        Snapshot {
            circles,
            target_color: target,
            target_color_label: target.label(Default::default()).to_string(),
            prompt: String::new(),
            score_label: String::new(),
            score: 0,
            spawn_interval_ms: 2000,
            in_progress,
            game_over: !in_progress,
        }
    }

    #[test]
    fn test_perfect_player_taps_newest_target() {
        let mut bot = AutoPlayer::new(1, 0.0);
        let snap = snapshot(
            vec![
                view(1, Color::Red, 100.0),
                view(2, Color::Blue, 300.0),
                view(3, Color::Red, 500.0),
            ],
            Color::Red,
            true,
        );
        assert_eq!(bot.choose_tap(&snap), Some(Vec2::new(500.0, 100.0)));
    }

    #[test]
    fn test_waits_without_target() {
        let mut bot = AutoPlayer::new(1, 0.0);
        let snap = snapshot(vec![view(1, Color::Blue, 100.0)], Color::Red, true);
        assert_eq!(bot.choose_tap(&snap), None);
    }

    #[test]
    fn test_clumsy_player_taps_wrong() {
        let mut bot = AutoPlayer::new(1, 1.0);
        let snap = snapshot(
            vec![view(1, Color::Red, 100.0), view(2, Color::Blue, 300.0)],
            Color::Red,
            true,
        );
        assert_eq!(bot.choose_tap(&snap), Some(Vec2::new(300.0, 100.0)));
    }

    #[test]
    fn test_idle_after_game_over() {
        let mut bot = AutoPlayer::new(1, 0.0);
        let snap = snapshot(vec![view(1, Color::Red, 100.0)], Color::Red, false);
        assert_eq!(bot.choose_tap(&snap), None);
    }
}
