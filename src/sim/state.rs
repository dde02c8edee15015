//! Round state and game rules
//!
//! All mutable state for a round lives in [`RoundState`]. Collaborators
//! (scheduler, surface bounds) are passed into each operation, so a tap and
//! a timer firing are each one indivisible step through the state machine.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::circle::{Bounds, Circle, topmost_hit};
use super::color::{Color, random_color};
use super::scheduler::{Scheduler, Task, TimerHandle};
use crate::error::ConfigError;
use crate::settings::Rules;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Nothing started yet
    Idle,
    /// Circles are spawning and taps count
    InProgress,
    /// A wrong tap ended the round
    GameOver,
}

/// Result of a tap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Round not in progress
    Ignored,
    /// No circle under the tap
    Empty,
    /// Target color tapped
    Hit {
        circle_id: u32,
        score: u32,
        sped_up: bool,
    },
    /// Wrong color tapped, round over
    Miss { circle_id: u32, final_score: u32 },
}

impl TapOutcome {
    /// Whether the tap changed the round
    pub fn changed_state(&self) -> bool {
        matches!(self, TapOutcome::Hit { .. } | TapOutcome::Miss { .. })
    }
}

/// Complete state of the current round
#[derive(Debug, Clone)]
pub struct RoundState<R: Rng = Pcg32> {
    pub score: u32,
    pub target: Color,
    pub spawn_interval_ms: u64,
    pub phase: RoundPhase,
    /// Active circles (sorted by id, i.e. spawn order)
    pub circles: Vec<Circle>,
    /// Incremented on every start; spawn tasks from older epochs are stale
    epoch: u32,
    /// Pending spawn, if any
    spawn_handle: Option<TimerHandle>,
    rules: Rules,
    rng: R,
    /// Next circle ID
    next_id: u32,
}

impl RoundState<Pcg32> {
    /// Create an idle round with a seeded RNG
    pub fn new(rules: Rules, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(rules, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> RoundState<R> {
    /// Create an idle round with any random source. Fails fast on invalid rules.
    pub fn with_rng(rules: Rules, mut rng: R) -> Result<Self, ConfigError> {
        rules.validate()?;
        let target = random_color(&rules.palette, &mut rng);
        Ok(Self {
            score: 0,
            target,
            spawn_interval_ms: rules.initial_spawn_interval_ms,
            phase: RoundPhase::Idle,
            circles: Vec::new(),
            epoch: 0,
            spawn_handle: None,
            rules,
            rng,
            next_id: 1,
        })
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    pub fn in_progress(&self) -> bool {
        self.phase == RoundPhase::InProgress
    }

    /// Whether a spawn is currently scheduled
    pub fn spawn_pending(&self) -> bool {
        self.spawn_handle.is_some()
    }

    /// Begin a fresh round and spawn the first circle immediately
    pub fn start<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S, bounds: Bounds) {
        self.cancel_spawn(scheduler);
        self.epoch = self.epoch.wrapping_add(1);
        self.score = 0;
        self.spawn_interval_ms = self.rules.initial_spawn_interval_ms;
        self.circles.clear();
        self.phase = RoundPhase::InProgress;
        self.pick_new_target();
        log::info!(
            "Round {} started: target {:?}, interval {} ms",
            self.epoch,
            self.target,
            self.spawn_interval_ms
        );
        self.spawn_circle(scheduler, bounds);
    }

    /// Clear the board and start again
    pub fn restart<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S, bounds: Bounds) {
        self.circles.clear();
        self.start(scheduler, bounds);
    }

    /// Choose a new target uniformly (repeats allowed)
    pub fn pick_new_target(&mut self) {
        self.target = random_color(&self.rules.palette, &mut self.rng);
    }

    /// Spawn one circle and schedule the next spawn at the current interval.
    ///
    /// Replaces any pending spawn, so there is never more than one spawn chain.
    pub fn spawn_circle<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S, bounds: Bounds) {
        let now = scheduler.now_ms();
        self.spawn_from(scheduler, bounds, now);
    }

    /// Spawn, then schedule the next spawn one interval after `base_ms`.
    ///
    /// A firing handled more than an interval late schedules the next one for now.
    fn spawn_from<S: Scheduler + ?Sized>(
        &mut self,
        scheduler: &mut S,
        bounds: Bounds,
        base_ms: u64,
    ) {
        if !self.in_progress() {
            return;
        }
        self.cancel_spawn(scheduler);

        let color = random_color(&self.rules.palette, &mut self.rng);
        let id = self.next_circle_id();
        let circle = Circle::spawn(id, color, self.rules.circle_radius, bounds, &mut self.rng);
        log::debug!(
            "Spawned circle {} {:?} at ({:.1}, {:.1})",
            id,
            color,
            circle.pos.x,
            circle.pos.y
        );
        self.circles.push(circle);

        let due_ms = base_ms
            .saturating_add(self.spawn_interval_ms)
            .max(scheduler.now_ms());
        let handle = scheduler.schedule_at(
            due_ms,
            Task::Spawn {
                epoch: self.epoch,
                due_ms,
            },
        );
        self.spawn_handle = Some(handle);
    }

    /// Run a task handed back by the scheduler.
    ///
    /// Returns true if the round changed. Stale tasks (older epoch, or any
    /// task once the round is over) are dropped.
    pub fn handle_task<S: Scheduler + ?Sized>(
        &mut self,
        task: Task,
        scheduler: &mut S,
        bounds: Bounds,
    ) -> bool {
        match task {
            Task::Spawn { epoch, due_ms } => {
                if epoch != self.epoch || !self.in_progress() {
                    log::debug!("Dropped stale spawn (epoch {}, current {})", epoch, self.epoch);
                    return false;
                }
                self.spawn_handle = None;
                self.spawn_from(scheduler, bounds, due_ms);
                true
            }
        }
    }

    /// Apply a tap at `point`
    pub fn resolve_tap<S: Scheduler + ?Sized>(
        &mut self,
        point: Vec2,
        scheduler: &mut S,
    ) -> TapOutcome {
        if !self.in_progress() {
            return TapOutcome::Ignored;
        }

        let Some((id, color)) = topmost_hit(&self.circles, point).map(|c| (c.id, c.color)) else {
            return TapOutcome::Empty;
        };
        self.circles.retain(|c| c.id != id);

        if color != self.target {
            log::debug!("Tapped {:?} while target was {:?}", color, self.target);
            self.game_over(scheduler);
            return TapOutcome::Miss {
                circle_id: id,
                final_score: self.score,
            };
        }

        self.score = self.score.saturating_add(self.rules.points_per_hit);
        self.pick_new_target();
        let sped_up = self.score % self.rules.speedup_every == 0;
        if sped_up {
            self.spawn_interval_ms = self.rules.sped_up(self.spawn_interval_ms);
            log::debug!("Speed-up at {}: interval {} ms", self.score, self.spawn_interval_ms);
        }
        TapOutcome::Hit {
            circle_id: id,
            score: self.score,
            sped_up,
        }
    }

    /// End the round and stop spawning
    pub fn game_over<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.phase = RoundPhase::GameOver;
        self.cancel_spawn(scheduler);
        log::info!("Game over: final score {}", self.score);
    }

    /// Add a circle directly (adapters replaying a board, tests)
    pub fn insert_circle(&mut self, color: Color, pos: Vec2) -> u32 {
        let id = self.next_circle_id();
        self.circles.push(Circle::new(id, color, pos, self.rules.circle_radius));
        id
    }

    fn cancel_spawn<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.spawn_handle.take() {
            scheduler.cancel(handle);
        }
    }

    fn next_circle_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
