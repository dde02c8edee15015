//! Platform abstraction layer
//!
//! The platform owns the window, drawing and touch delivery. The core only
//! needs two things from it:
//! - Current surface bounds, on request
//! - Somewhere to send snapshots after each state change
//!
//! Taps flow the other way through [`crate::game::Game::on_tap`].

use std::io::Write;

use crate::sim::{Bounds, Snapshot};

/// Contract between the game core and a platform front end
pub trait PresentationAdapter {
    /// Playable width/height in tap coordinates
    fn bounds(&self) -> Bounds;

    /// Show the latest state
    fn present(&mut self, snapshot: &Snapshot);
}

/// Headless adapter with fixed bounds that keeps every snapshot
#[derive(Debug, Clone)]
pub struct RecordingAdapter {
    pub bounds: Bounds,
    pub frames: Vec<Snapshot>,
}

impl RecordingAdapter {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            frames: Vec::new(),
        }
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.frames.last()
    }
}

impl PresentationAdapter for RecordingAdapter {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn present(&mut self, snapshot: &Snapshot) {
        self.frames.push(snapshot.clone());
    }
}

/// Writes each snapshot as one JSON line
#[derive(Debug)]
pub struct JsonLinesAdapter<W: Write> {
    bounds: Bounds,
    out: W,
    written: usize,
}

impl<W: Write> JsonLinesAdapter<W> {
    pub fn new(bounds: Bounds, out: W) -> Self {
        Self {
            bounds,
            out,
            written: 0,
        }
    }

    /// Number of snapshots written so far
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PresentationAdapter for JsonLinesAdapter<W> {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn present(&mut self, snapshot: &Snapshot) {
        let result = serde_json::to_writer(&mut self.out, snapshot)
            .map_err(std::io::Error::from)
            .and_then(|_| self.out.write_all(b"\n"));
        match result {
            Ok(()) => self.written += 1,
            Err(e) => log::warn!("Failed to write snapshot: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Rules;
    use crate::sim::{Language, RoundState};

    #[test]
    fn test_json_lines_one_per_snapshot() {
        let round = RoundState::new(Rules::default(), 1).unwrap();
        let snap = Snapshot::capture(&round, Language::English);
        let mut adapter = JsonLinesAdapter::new(Bounds::new(100.0, 100.0), Vec::new());

        adapter.present(&snap);
        adapter.present(&snap);

        assert_eq!(adapter.written(), 2);
        let out = String::from_utf8(adapter.into_inner()).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        let parsed: Snapshot = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed, snap);
    }
}
