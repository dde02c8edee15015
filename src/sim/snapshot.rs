//! Render snapshots
//!
//! A snapshot is everything the platform needs to draw a frame and update
//! its labels. It is captured after every state change.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::circle::Circle;
use super::color::{Color, Language};
use super::state::{RoundPhase, RoundState};

/// A circle as the renderer sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub color: Color,
    /// Packed 0xRRGGBB
    pub rgb: u32,
}

impl From<&Circle> for CircleView {
    fn from(c: &Circle) -> Self {
        Self {
            id: c.id,
            x: c.pos.x,
            y: c.pos.y,
            radius: c.radius,
            color: c.color,
            rgb: c.color.rgb(),
        }
    }
}

/// Round state for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Active circles, oldest first (draw in order)
    pub circles: Vec<CircleView>,
    pub target_color: Color,
    pub target_color_label: String,
    /// Prompt line ("Tap RED", or the game-over message)
    pub prompt: String,
    pub score_label: String,
    pub score: u32,
    pub spawn_interval_ms: u64,
    pub in_progress: bool,
    /// Round ended; the restart control should be shown
    pub game_over: bool,
}

impl Snapshot {
    pub fn capture<R: Rng>(round: &RoundState<R>, language: Language) -> Self {
        let game_over = round.phase == RoundPhase::GameOver;
        let prompt = if game_over {
            language.game_over(round.score)
        } else {
            language.prompt(round.target)
        };
        Self {
            circles: round.circles.iter().map(CircleView::from).collect(),
            target_color: round.target,
            target_color_label: round.target.label(language).to_string(),
            prompt,
            score_label: language.score_label(round.score),
            score: round.score,
            spawn_interval_ms: round.spawn_interval_ms,
            in_progress: round.in_progress(),
            game_over,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Rules;
    use crate::sim::circle::Bounds;
    use crate::sim::scheduler::VirtualClock;
    use glam::Vec2;

    #[test]
    fn test_capture_in_progress() {
        let mut clock = VirtualClock::new();
        let mut round = RoundState::new(Rules::default(), 5).unwrap();
        round.start(&mut clock, Bounds::new(800.0, 600.0));
        round.target = Color::Green;

        let snap = Snapshot::capture(&round, Language::English);

        assert_eq!(snap.circles.len(), 1);
        assert_eq!(snap.target_color_label, "GREEN");
        assert_eq!(snap.prompt, "Tap GREEN");
        assert_eq!(snap.score_label, "Score: 0");
        assert!(snap.in_progress);
        assert!(!snap.game_over);
    }

    #[test]
    fn test_capture_game_over() {
        let mut clock = VirtualClock::new();
        let mut round = RoundState::new(Rules::default(), 5).unwrap();
        round.start(&mut clock, Bounds::new(800.0, 600.0));
        round.circles.clear();
        round.target = Color::Red;
        let pos = Vec2::new(100.0, 100.0);
        round.insert_circle(Color::Red, pos);
        round.resolve_tap(pos, &mut clock);
        round.insert_circle(Color::Blue, pos);
        round.target = Color::Red;
        round.resolve_tap(pos, &mut clock);

        let snap = Snapshot::capture(&round, Language::Russian);

        assert!(snap.game_over);
        assert!(!snap.in_progress);
        assert_eq!(snap.score, 10);
        assert_eq!(snap.prompt, "Игра окончена! Очки: 10");
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut round = RoundState::new(Rules::default(), 5).unwrap();
        round.target = Color::Magenta;
        round.insert_circle(Color::Cyan, Vec2::new(1.0, 2.0));
        let json = serde_json::to_string(&Snapshot::capture(&round, Language::English)).unwrap();
        assert!(json.contains(r#""color":"cyan""#));
        assert!(json.contains(r#""target_color_label":"MAGENTA""#));
    }
}
