//! Game driver
//!
//! Owns the round, the scheduler and the platform adapter. Every tap and
//! every timer firing goes through here as one step, and each step that
//! changes the round is followed by a snapshot to the adapter.

use glam::Vec2;

use crate::error::ConfigError;
use crate::platform::PresentationAdapter;
use crate::settings::Settings;
use crate::sim::{Language, RoundState, Scheduler, Snapshot, TapOutcome, VirtualClock};

pub struct Game<S: Scheduler, A: PresentationAdapter> {
    round: RoundState,
    scheduler: S,
    adapter: A,
    language: Language,
}

impl<S: Scheduler, A: PresentationAdapter> Game<S, A> {
    /// Build an idle game. Invalid rules are rejected here, before any round runs.
    pub fn new(
        settings: &Settings,
        seed: u64,
        scheduler: S,
        adapter: A,
    ) -> Result<Self, ConfigError> {
        let round = RoundState::new(settings.rules.clone(), seed)?;
        Ok(Self {
            round,
            scheduler,
            adapter,
            language: settings.language,
        })
    }

    /// Start the first round
    pub fn start(&mut self) {
        let bounds = self.adapter.bounds();
        self.round.start(&mut self.scheduler, bounds);
        self.present();
    }

    /// Clear the board and start over (the restart button)
    pub fn restart(&mut self) {
        let bounds = self.adapter.bounds();
        self.round.restart(&mut self.scheduler, bounds);
        self.present();
    }

    /// Forward a tap in surface coordinates
    pub fn on_tap(&mut self, x: f32, y: f32) -> TapOutcome {
        let outcome = self.round.resolve_tap(Vec2::new(x, y), &mut self.scheduler);
        log::debug!("Tap at ({:.1}, {:.1}): {:?}", x, y, outcome);
        if outcome.changed_state() {
            self.present();
        }
        outcome
    }

    /// Run every task that is due now. Returns how many changed the round.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(task) = self.scheduler.poll_due() {
            let bounds = self.adapter.bounds();
            if self.round.handle_task(task, &mut self.scheduler, bounds) {
                applied += 1;
                self.present();
            }
        }
        applied
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.round, self.language)
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn into_adapter(self) -> A {
        self.adapter
    }

    fn present(&mut self) {
        let snapshot = Snapshot::capture(&self.round, self.language);
        self.adapter.present(&snapshot);
    }
}

impl<A: PresentationAdapter> Game<VirtualClock, A> {
    /// Move virtual time forward, firing tasks at their own deadlines.
    ///
    /// A spawn that reschedules inside the window fires within the same call.
    pub fn advance(&mut self, ms: u64) -> usize {
        let until = self.scheduler.now_ms().saturating_add(ms);
        let mut applied = 0;
        while let Some(deadline) = self.scheduler.next_deadline().filter(|d| *d <= until) {
            self.scheduler.set_now(deadline);
            applied += self.pump();
        }
        self.scheduler.set_now(until);
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::RecordingAdapter;
    use crate::settings::Rules;
    use crate::sim::{Bounds, RoundPhase, topmost_hit};

    fn game(seed: u64) -> Game<VirtualClock, RecordingAdapter> {
        Game::new(
            &Settings::default(),
            seed,
            VirtualClock::new(),
            RecordingAdapter::new(Bounds::new(1080.0, 1920.0)),
        )
        .unwrap()
    }

    /// Tap the newest uncovered circle that is (or is not) the target color
    fn tap_color(
        game: &mut Game<VirtualClock, RecordingAdapter>,
        want_target: bool,
    ) -> Option<TapOutcome> {
        let round = game.round();
        let pos = round
            .circles
            .iter()
            .rev()
            .filter(|c| (c.color == round.target) == want_target)
            .find(|c| topmost_hit(&round.circles, c.pos).is_some_and(|top| top.id == c.id))
            .map(|c| c.pos)?;
        Some(game.on_tap(pos.x, pos.y))
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = Settings {
            rules: Rules {
                palette: Vec::new(),
                ..Default::default()
            },
            ..Default::default()
        };
        let result = Game::new(
            &settings,
            1,
            VirtualClock::new(),
            RecordingAdapter::new(Bounds::new(100.0, 100.0)),
        );
        assert!(matches!(result, Err(ConfigError::EmptyPalette)));
    }

    #[test]
    fn test_start_presents_first_frame() {
        let mut game = game(1);
        game.start();
        let frames = &game.adapter().frames;
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].circles.len(), 1);
        assert!(frames[0].in_progress);
    }

    #[test]
    fn test_every_spawn_presents() {
        let mut game = game(2);
        game.start();
        let applied = game.advance(6000);
        assert_eq!(applied, 3);
        assert_eq!(game.adapter().frames.len(), 4);
        assert_eq!(game.adapter().last().map(|s| s.circles.len()), Some(4));
    }

    #[test]
    fn test_empty_tap_presents_nothing() {
        let mut game = game(3);
        game.start();
        let before = game.snapshot();
        assert_eq!(game.on_tap(-1000.0, -1000.0), TapOutcome::Empty);
        assert_eq!(game.adapter().frames.len(), 1);
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn test_wrong_tap_halts_spawning() {
        let mut game = game(4);
        game.start();
        // Spawn until a wrong-colored circle is on the board
        while tap_color(&mut game, false).is_none() {
            game.advance(2000);
        }
        assert_eq!(game.round().phase, RoundPhase::GameOver);
        let circles = game.round().circles.len();
        let frames = game.adapter().frames.len();

        assert_eq!(game.advance(20_000), 0);
        assert_eq!(game.round().circles.len(), circles);
        assert_eq!(game.adapter().frames.len(), frames);
        assert!(game.adapter().last().is_some_and(|s| s.game_over));
        assert_eq!(game.on_tap(0.0, 0.0), TapOutcome::Ignored);
    }

    #[test]
    fn test_round_to_fifty_speeds_up() {
        let mut game = game(5);
        game.start();
        let mut elapsed = 0;
        while game.round().score < 50 && elapsed < 600_000 {
            assert!(game.round().in_progress());
            if tap_color(&mut game, true).is_none() {
                game.advance(100);
                elapsed += 100;
            }
        }
        assert_eq!(game.round().score, 50);
        assert_eq!(game.round().spawn_interval_ms, 1600);
        assert!(game.round().in_progress());
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut game = game(6);
        game.start();
        while tap_color(&mut game, false).is_none() {
            game.advance(2000);
        }
        game.restart();

        let round = game.round();
        assert_eq!(round.phase, RoundPhase::InProgress);
        assert_eq!(round.score, 0);
        assert_eq!(round.circles.len(), 1);
        assert_eq!(game.scheduler().pending(), 1);
        assert_eq!(game.advance(2000), 1);
    }

    #[test]
    fn test_restart_mid_round_drops_old_timer() {
        let mut game = game(7);
        game.start();
        game.advance(1500);
        game.restart();
        // Old deadline was 2000; the new round's first spawn is due at 3500
        assert_eq!(game.advance(1000), 0);
        assert_eq!(game.advance(1000), 1);
        assert_eq!(game.round().circles.len(), 2);
    }

    #[test]
    fn test_target_prompt_follows_target() {
        let mut game = game(8);
        game.start();
        for _ in 0..20 {
            let snap = game.snapshot();
            assert_eq!(snap.prompt, format!("Tap {}", snap.target_color_label));
            assert_eq!(snap.target_color_label, snap.target_color.label(Language::English));
            if tap_color(&mut game, true).is_none() {
                game.advance(2000);
            }
        }
        assert!(game.round().in_progress());
    }
}
