// Deferred Callback Queue
// Holds callbacks scheduled for a later frame or time, tagged by run

use std::cmp::Ordering;

/// When a deferred callback becomes due
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    /// Once the clock reaches this many seconds
    AtTime(f64),
    /// Once the clock reaches this frame
    AtFrame(u64),
}

/// Identifies one playback run; callbacks from retired runs never fire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RunToken(u64);

impl RunToken {
    /// The token that follows this one
    pub fn next(self) -> Self {
        RunToken(self.0.wrapping_add(1))
    }

    /// Raw generation number
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// A scheduled callback
#[derive(Debug, Clone)]
pub struct Deferred<C> {
    /// Unique id, also the scheduling order
    pub id: u64,
    /// When the callback fires
    pub trigger: Trigger,
    /// Owning run (None for callbacks tied to the instance, not a run)
    pub run: Option<RunToken>,
    /// What to run
    pub callback: C,
}

/// Queue of deferred callbacks
#[derive(Debug)]
pub struct DeferredQueue<C> {
    entries: Vec<Deferred<C>>,
    next_id: u64,
}

impl<C> DeferredQueue<C> {
    /// Create an empty queue
    pub fn new() -> Self {
        DeferredQueue {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedule a callback, returning its id
    pub fn add(&mut self, trigger: Trigger, run: Option<RunToken>, callback: C) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Deferred {
            id,
            trigger,
            run,
            callback,
        });
        id
    }

    /// Remove a callback by id
    pub fn remove(&mut self, id: u64) -> Option<Deferred<C>> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(pos))
    }

    /// Drop every callback owned by `run`, returning how many were dropped
    pub fn cancel_run(&mut self, run: RunToken) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.run != Some(run));
        before - self.entries.len()
    }

    /// Take every callback that is due, in firing order.
    ///
    /// Timed callbacks are ordered by their due time; frame callbacks sort
    /// as if due at `now_seconds`. Ties go to the earlier scheduled one.
    pub fn take_due(&mut self, is_due: impl Fn(Trigger) -> bool, now_seconds: f64) -> Vec<Deferred<C>> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.entries.drain(..).partition(|e| is_due(e.trigger));
        self.entries = pending;

        let key = |e: &Deferred<C>| match e.trigger {
            Trigger::AtTime(at) => at,
            Trigger::AtFrame(_) => now_seconds,
        };
        due.sort_by(|a, b| {
            key(a)
                .partial_cmp(&key(b))
                .unwrap_or(Ordering::Equal)
                .then(a.id.cmp(&b.id))
        });
        due
    }

    /// Remove all callbacks
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of scheduled callbacks
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is scheduled
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over scheduled callbacks in scheduling order
    pub fn iter(&self) -> impl Iterator<Item = &Deferred<C>> {
        self.entries.iter()
    }
}

impl<C> Default for DeferredQueue<C> {
    fn default() -> Self {
        Self::new()
    }
}
