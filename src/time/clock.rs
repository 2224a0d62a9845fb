// Frame Clock
// Tracks elapsed seconds and frame count as the host's update loop ticks

use super::events::Trigger;

/// Clock advanced once per host frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    elapsed: f64,
    frame: u64,
}

impl FrameClock {
    /// Create a clock at time zero, frame zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one frame lasting `delta_seconds`.
    ///
    /// Negative or non-finite deltas still count the frame but add no time.
    pub fn tick(&mut self, delta_seconds: f32) {
        if delta_seconds.is_finite() && delta_seconds > 0.0 {
            self.elapsed += f64::from(delta_seconds);
        }
        self.frame += 1;
    }

    /// Seconds since the clock started
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Frames since the clock started
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Trigger firing `seconds` from now.
    ///
    /// Zero or negative delays fire on the next frame.
    pub fn after_seconds(&self, seconds: f32) -> Trigger {
        if seconds.is_finite() && seconds > 0.0 {
            Trigger::AtTime(self.elapsed + f64::from(seconds))
        } else {
            self.after_frames(1)
        }
    }

    /// Trigger firing `frames` frames from now (at least one)
    pub fn after_frames(&self, frames: u32) -> Trigger {
        Trigger::AtFrame(self.frame + u64::from(frames.max(1)))
    }

    /// Check whether a trigger has come due
    pub fn is_due(&self, trigger: Trigger) -> bool {
        match trigger {
            Trigger::AtTime(at) => at <= self.elapsed,
            Trigger::AtFrame(at) => at <= self.frame,
        }
    }
}
