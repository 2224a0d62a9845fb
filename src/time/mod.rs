//! Frame clock and deferred callback scheduling
//!
//! The host calls `Scheduler::advance` once per frame. Anything scheduled
//! with `send_delayed_seconds` or `send_delayed_frames` comes back out of
//! `advance` once due. Callbacks are tagged with the `RunToken` of the run
//! that scheduled them so a superseded run can be cancelled as a whole.

pub mod clock;
pub mod events;

pub use clock::FrameClock;
pub use events::{Deferred, DeferredQueue, RunToken, Trigger};

/// Clock plus queue of callbacks waiting on it
#[derive(Debug)]
pub struct Scheduler<C> {
    clock: FrameClock,
    queue: DeferredQueue<C>,
}

impl<C> Scheduler<C> {
    /// Create a scheduler at time zero with nothing queued
    pub fn new() -> Self {
        Self {
            clock: FrameClock::new(),
            queue: DeferredQueue::new(),
        }
    }

    /// Run `callback` after `seconds` (next frame when not positive)
    pub fn send_delayed_seconds(&mut self, callback: C, seconds: f32, run: Option<RunToken>) -> u64 {
        let trigger = self.clock.after_seconds(seconds);
        self.queue.add(trigger, run, callback)
    }

    /// Run `callback` after `frames` frames (at least one)
    pub fn send_delayed_frames(&mut self, callback: C, frames: u32, run: Option<RunToken>) -> u64 {
        let trigger = self.clock.after_frames(frames);
        self.queue.add(trigger, run, callback)
    }

    /// Advance one frame and take everything that came due
    pub fn advance(&mut self, delta_seconds: f32) -> Vec<Deferred<C>> {
        self.clock.tick(delta_seconds);
        let clock = self.clock;
        self.queue.take_due(|t| clock.is_due(t), clock.elapsed())
    }

    /// Drop every queued callback of a run
    pub fn cancel_run(&mut self, run: RunToken) -> usize {
        self.queue.cancel_run(run)
    }

    /// Drop every queued callback
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Number of queued callbacks
    pub fn pending(&self) -> usize {
        self.queue.count()
    }

    /// Iterate over queued callbacks
    pub fn iter(&self) -> impl Iterator<Item = &Deferred<C>> {
        self.queue.iter()
    }

    /// The clock driving this scheduler
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }
}

impl<C> Default for Scheduler<C> {
    fn default() -> Self {
        Self::new()
    }
}
