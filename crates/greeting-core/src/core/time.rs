//! Deferred-callback scheduler on a millisecond clock.
//!
//! The host advances the clock once per animation frame; due timers are
//! popped one at a time so a handler can cancel another timer (or itself)
//! before the next one fires.

/// Handle to a scheduled timer, used for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u32);

#[derive(Debug, Clone)]
struct Timer<T> {
    id: TimerId,
    due: f64,
    /// Repeat period for interval timers.
    period: Option<f64>,
    /// Insertion order, breaks ties between timers due at the same instant.
    seq: u64,
    task: T,
}

/// Ordered one-shot and repeating timers carrying a task payload.
#[derive(Debug)]
pub struct Timeline<T> {
    now: f64,
    timers: Vec<Timer<T>>,
    next_id: u32,
    next_seq: u64,
}

impl<T: Clone> Timeline<T> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            timers: Vec::new(),
            next_id: 1,
            next_seq: 0,
        }
    }

    /// Current clock value in milliseconds.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Run `task` once, `delay` milliseconds from now.
    pub fn set_timeout(&mut self, delay: f64, task: T) -> TimerId {
        self.insert(delay.max(0.0), None, task)
    }

    /// Run `task` every `period` milliseconds, first firing one period from now.
    pub fn set_interval(&mut self, period: f64, task: T) -> TimerId {
        let period = period.max(1.0);
        self.insert(period, Some(period), task)
    }

    fn insert(&mut self, delay: f64, period: Option<f64>, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.push(Timer {
            id,
            due: self.now + delay,
            period,
            seq,
            task,
        });
        id
    }

    /// Cancel a timer. Returns false if it already fired (one-shot) or was cancelled.
    pub fn clear(&mut self, id: TimerId) -> bool {
        match self.timers.iter().position(|t| t.id == id) {
            Some(idx) => {
                self.timers.swap_remove(idx);
                true
            }
            None => false,
        }
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to its due time.
    /// Interval timers are re-armed one period later.
    pub fn pop_due(&mut self, until: f64) -> Option<(TimerId, T)> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)))
            .map(|(idx, _)| idx)?;

        let due = self.timers[idx].due;
        self.now = self.now.max(due);

        let fired = match self.timers[idx].period {
            Some(period) => {
                let seq = self.next_seq;
                self.next_seq += 1;
                let timer = &mut self.timers[idx];
                timer.due += period;
                timer.seq = seq;
                (timer.id, timer.task.clone())
            }
            None => {
                let timer = self.timers.swap_remove(idx);
                (timer.id, timer.task)
            }
        };
        Some(fired)
    }

    /// Move the clock forward to `until` once all due timers have been popped.
    pub fn settle(&mut self, until: f64) {
        self.now = self.now.max(until);
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Whether no timers are pending.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

impl<T: Clone> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}
