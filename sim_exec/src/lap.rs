//! # Lap counter
//!
//! Detects the vehicle crossing the X = 0 reference line in the positive X
//! direction and records the tick at which each crossing happened. Laps are
//! the intervals between consecutive markers.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Lap-crossing detector and lap marker store.
#[derive(Debug, Clone, Default)]
pub struct LapCounter {
    /// Tick indices of each crossing, strictly increasing
    markers: Vec<u64>,

    /// Tick and X position seen on the previous update
    prev: Option<(u64, f64)>,
}

/// A completed lap between two consecutive markers.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Lap {
    pub start_tick: u64,
    pub end_tick: u64,

    /// Units: seconds
    pub duration_s: f64,
}

/// Summary of all laps in a run, saved at the end of a session.
#[derive(Debug, Clone, Serialize)]
pub struct LapSummary {
    pub markers: Vec<u64>,
    pub laps: Vec<Lap>,
    pub best_lap_s: Option<f64>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl LapCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update with the vehicle's X position at the given tick.
    ///
    /// A marker is recorded when the previous X was negative and the current
    /// X is zero or positive. The first update (tick 0) never records a
    /// marker. Ticks must be passed in increasing order. Returns true if a
    /// marker was recorded.
    pub fn update(&mut self, tick: u64, x_cm: f64) -> bool {
        let crossed = match self.prev {
            Some((prev_tick, prev_x_cm)) => {
                tick > 0 && tick > prev_tick && prev_x_cm < 0.0 && x_cm >= 0.0
            }
            None => false,
        };

        if crossed {
            self.markers.push(tick);
        }

        self.prev = Some((tick, x_cm));

        crossed
    }

    /// Tick indices of every crossing so far.
    pub fn markers(&self) -> &[u64] {
        &self.markers
    }

    /// Completed laps, given the fixed simulation timestep.
    pub fn laps(&self, timestep_s: f64) -> Vec<Lap> {
        self.markers
            .windows(2)
            .map(|w| Lap {
                start_tick: w[0],
                end_tick: w[1],
                duration_s: (w[1] - w[0]) as f64 * timestep_s,
            })
            .collect()
    }

    /// Summarise the laps for reporting.
    pub fn summary(&self, timestep_s: f64) -> LapSummary {
        let laps = self.laps(timestep_s);
        let best_lap_s = laps
            .iter()
            .map(|l| l.duration_s)
            .fold(None, |best: Option<f64>, d| match best {
                Some(b) if b <= d => Some(b),
                _ => Some(d),
            });

        LapSummary {
            markers: self.markers.clone(),
            laps,
            best_lap_s,
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
