//! Delayed task scheduling
//!
//! The round never talks to a platform timer directly. It schedules [`Task`]s
//! on a [`Scheduler`] and the game driver hands due tasks back to the round.
//! Two clocks are provided:
//! - [`VirtualClock`]: time only moves when told to (tests, headless demo)
//! - [`WallClock`]: milliseconds since creation, for real-time play

use std::collections::BTreeMap;
use std::time::Instant;

/// Work the round asks to have done later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Spawn the next circle for the round started at `epoch`.
    ///
    /// `due_ms` is the deadline the task was scheduled for, so the next spawn
    /// is timed from it rather than from when the task was handled.
    Spawn { epoch: u32, due_ms: u64 },
}

/// Cancelable handle for a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    deadline_ms: u64,
    id: u64,
}

impl TimerHandle {
    pub fn deadline_ms(&self) -> u64 {
        self.deadline_ms
    }
}

/// Source of time and delayed tasks
pub trait Scheduler {
    /// Current time in milliseconds
    fn now_ms(&self) -> u64;

    /// Run `task` once the clock reaches `deadline_ms`
    fn schedule_at(&mut self, deadline_ms: u64, task: Task) -> TimerHandle;

    /// Run `task` once `delay_ms` has elapsed
    fn schedule_after(&mut self, delay_ms: u64, task: Task) -> TimerHandle {
        let deadline = self.now_ms().saturating_add(delay_ms);
        self.schedule_at(deadline, task)
    }

    /// Cancel a pending task. Returns false if it already fired or was canceled.
    fn cancel(&mut self, handle: TimerHandle) -> bool;

    /// Pop the earliest task whose deadline has passed
    fn poll_due(&mut self) -> Option<Task>;

    /// Deadline of the earliest pending task
    fn next_deadline(&self) -> Option<u64>;

    /// Number of pending tasks
    fn pending(&self) -> usize;
}

/// Deadline-ordered task queue shared by both clocks.
///
/// Ties on deadline fire in scheduling order.
#[derive(Debug, Default)]
pub struct TimerQueue {
    entries: BTreeMap<(u64, u64), Task>,
    next_id: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, deadline_ms: u64, task: Task) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert((deadline_ms, id), task);
        TimerHandle { deadline_ms, id }
    }

    pub fn remove(&mut self, handle: TimerHandle) -> bool {
        self.entries.remove(&(handle.deadline_ms, handle.id)).is_some()
    }

    pub fn pop_due(&mut self, now_ms: u64) -> Option<Task> {
        let (&key, _) = self.entries.iter().next()?;
        if key.0 > now_ms {
            return None;
        }
        self.entries.remove(&key)
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.keys().next().map(|&(deadline, _)| deadline)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Manually advanced clock
#[derive(Debug, Default)]
pub struct VirtualClock {
    now_ms: u64,
    queue: TimerQueue,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward. Time never goes backwards.
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }
}

impl Scheduler for VirtualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn schedule_at(&mut self, deadline_ms: u64, task: Task) -> TimerHandle {
        self.queue.insert(deadline_ms, task)
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.queue.remove(handle)
    }

    fn poll_due(&mut self) -> Option<Task> {
        self.queue.pop_due(self.now_ms)
    }

    fn next_deadline(&self) -> Option<u64> {
        self.queue.next_deadline()
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }
}

/// Real-time clock measured from construction
#[derive(Debug)]
pub struct WallClock {
    origin: Instant,
    queue: TimerQueue,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            queue: TimerQueue::new(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for WallClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn schedule_at(&mut self, deadline_ms: u64, task: Task) -> TimerHandle {
        self.queue.insert(deadline_ms, task)
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.queue.remove(handle)
    }

    fn poll_due(&mut self) -> Option<Task> {
        let now = self.now_ms();
        self.queue.pop_due(now)
    }

    fn next_deadline(&self) -> Option<u64> {
        self.queue.next_deadline()
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }
}
