//! Playback pacing clock.
//!
//! Decides how long to idle before presenting a decoded frame so that
//! real-time inter-frame gaps reproduce the recorded timestamp gaps.
//! Overruns and seek discontinuities collapse to a zero wait instead of
//! accumulating, so playback never compounds drift.

use std::time::{Duration, Instant};

/// Self-correcting frame-presentation clock.
///
/// The clock anchors on the last presented recording timestamp and the
/// wall-clock instant that frame was scheduled to appear. Anchoring on the
/// scheduled instant (rather than the moment `tick` ran) means only real
/// processing time is charged against the next frame's budget: with zero
/// processing time, successive ticks return exactly the recorded deltas.
#[derive(Debug, Default)]
pub struct PlaybackClock {
    /// (last presented recording timestamp, scheduled presentation instant).
    anchor: Option<(f64, Instant)>,
}

impl PlaybackClock {
    /// Create an unanchored clock; the first tick presents immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the wait before presenting the frame with this timestamp.
    ///
    /// A negative budget (previous iteration overran, or playback jumped
    /// backwards) clamps to zero; that is expected behavior, not a fault.
    pub fn tick(&mut self, frame_timestamp: f64) -> Duration {
        self.tick_at(frame_timestamp, Instant::now())
    }

    /// `tick` against an explicit wall-clock reading. Deterministic; the
    /// seam the tests drive.
    pub fn tick_at(&mut self, frame_timestamp: f64, now: Instant) -> Duration {
        let wait = match self.anchor {
            Some((last_ts, mark)) => {
                let elapsed = now.saturating_duration_since(mark).as_secs_f64();
                (frame_timestamp - last_ts) - elapsed
            }
            None => 0.0,
        };

        if wait > 0.0 {
            let wait = Duration::from_secs_f64(wait);
            self.anchor = Some((frame_timestamp, now + wait));
            wait
        } else {
            self.anchor = Some((frame_timestamp, now));
            Duration::ZERO
        }
    }

    /// Re-anchor after an explicit seek so the next tick does not account
    /// for the time discontinuity.
    pub fn reset_to(&mut self, frame_timestamp: f64) {
        self.reset_to_at(frame_timestamp, Instant::now());
    }

    /// `reset_to` against an explicit wall-clock reading.
    pub fn reset_to_at(&mut self, frame_timestamp: f64, now: Instant) {
        self.anchor = Some((frame_timestamp, now));
    }

    /// Drop the anchor entirely; the next tick presents immediately.
    pub fn reset(&mut self) {
        self.anchor = None;
    }
}
