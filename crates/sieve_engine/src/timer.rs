use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

/// Keyed one-shot timers on a virtual clock.
///
/// Scheduling a key that is already armed replaces its deadline, so each key
/// fires at most once per arming. Timers with equal deadlines fire in the
/// order they were armed.
#[derive(Debug)]
pub struct TimerQueue<K> {
    armed: HashMap<K, (Duration, u64)>,
    seq: u64,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self {
            armed: HashMap::new(),
            seq: 0,
        }
    }
}

impl<K: Copy + Eq + Hash> TimerQueue<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, key: K, deadline: Duration) {
        self.seq += 1;
        self.armed.insert(key, (deadline, self.seq));
    }

    pub fn cancel(&mut self, key: K) -> bool {
        self.armed.remove(&key).is_some()
    }

    pub fn is_armed(&self, key: K) -> bool {
        self.armed.contains_key(&key)
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.armed.values().map(|(at, _)| *at).min()
    }

    /// Disarms and returns the earliest timer due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<(K, Duration)> {
        let (key, (at, _)) = self
            .armed
            .iter()
            .filter(|(_, (at, _))| *at <= now)
            .min_by_key(|(_, slot)| **slot)
            .map(|(key, slot)| (*key, *slot))?;
        self.armed.remove(&key);
        Some((key, at))
    }

    pub fn len(&self) -> usize {
        self.armed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.armed.is_empty()
    }
}
