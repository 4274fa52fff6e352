//! Tick-counted timers.
//!
//! Nothing here reads a clock. Second-based tunables are converted to a number
//! of fixed ticks once, and every timer advances by exactly one tick per call.

use std::collections::BTreeMap;

/// Converts a duration in seconds to a number of fixed ticks.
///
/// Exact multiples of `fixed_delta` (within float noise) round to the nearest
/// tick; anything else rounds up so a timer never fires early.
pub fn frames_for(seconds: f32, fixed_delta: f32) -> u32 {
    if seconds <= 0.0 || fixed_delta <= 0.0 {
        return 0;
    }
    let frames = seconds / fixed_delta;
    let rounded = frames.round();
    if (frames - rounded).abs() < 1.0e-3 {
        rounded as u32
    } else {
        frames.ceil() as u32
    }
}

/// A counter that becomes ready after a fixed number of increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cooldown {
    frames: u32,
    counter: u32,
}

impl Cooldown {
    pub fn new(frames: u32) -> Self {
        Self { frames, counter: 0 }
    }

    /// Build from a duration, rounded to ticks with [`frames_for`].
    pub fn from_seconds(seconds: f32, fixed_delta: f32) -> Self {
        Self::new(frames_for(seconds, fixed_delta))
    }

    #[inline]
    pub fn reset(&mut self) {
        self.counter = 0;
    }

    #[inline]
    pub fn increment(&mut self) {
        self.counter = self.counter.saturating_add(1);
    }

    #[inline]
    pub fn ready(&self) -> bool {
        self.counter >= self.frames
    }

    /// Increment, then report readiness.
    #[inline]
    pub fn inc_ready(&mut self) -> bool {
        self.increment();
        self.ready()
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }
}

/// One-shot timers keyed by what they will do when they fire.
///
/// Arming a key that is already pending is a no-op: the first deadline is
/// kept. There is no cancel; an armed timer always fires.
#[derive(Debug, Clone)]
pub struct TimerQueue<K: Ord + Clone> {
    pending: BTreeMap<K, u32>,
}

impl<K: Ord + Clone> Default for TimerQueue<K> {
    fn default() -> Self {
        Self {
            pending: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Clone> TimerQueue<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms `key` to fire after `ticks` calls to [`advance`](Self::advance).
    /// Returns false when the key was already armed.
    pub fn arm(&mut self, key: K, ticks: u32) -> bool {
        if self.pending.contains_key(&key) {
            return false;
        }
        self.pending.insert(key, ticks);
        true
    }

    pub fn is_armed(&self, key: &K) -> bool {
        self.pending.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Advances every timer by one tick and returns the keys that fired, in
    /// key order.
    pub fn advance(&mut self) -> Vec<K> {
        let mut fired = Vec::new();
        self.pending.retain(|key, remaining| {
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                fired.push(key.clone());
                false
            } else {
                true
            }
        });
        fired
    }
}
