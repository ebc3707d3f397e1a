//! Post-wish celebration: a bounded run of confetti bursts on a repeating timer.

use crate::api::types::Task;
use crate::core::time::{TimerId, Timeline};

/// Counts celebration bursts and owns the repeating timer that drives them.
#[derive(Debug, Default)]
pub struct Celebration {
    fired: u32,
    total: u32,
    timer: Option<TimerId>,
    started: bool,
}

impl Celebration {
    pub fn new(total: u32) -> Self {
        Self { total, ..Self::default() }
    }

    /// Start the run: the caller fires the first burst right away, the rest come
    /// from the timeline every `interval_ms`. Returns false if already started.
    pub fn start(&mut self, timeline: &mut Timeline<Task>, interval_ms: f64) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        self.fired = 1;
        if self.fired < self.total {
            self.timer = Some(timeline.set_interval(interval_ms, Task::CelebrationBurst));
        }
        true
    }

    /// Account for one timer firing. Returns whether a burst should go off;
    /// the timer is cancelled right after the last one.
    pub fn on_tick(&mut self, timeline: &mut Timeline<Task>) -> bool {
        if self.fired >= self.total {
            self.cancel(timeline);
            return false;
        }
        self.fired += 1;
        if self.fired >= self.total {
            self.cancel(timeline);
            log::info!("celebration finished after {} bursts", self.fired);
        }
        true
    }

    fn cancel(&mut self, timeline: &mut Timeline<Task>) {
        if let Some(id) = self.timer.take() {
            timeline.clear(id);
        }
    }

    pub fn fired(&self) -> u32 {
        self.fired
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Whether the repeating timer is still armed.
    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(c: &mut Celebration, tl: &mut Timeline<Task>, until: f64) -> u32 {
        let mut bursts = 0;
        while let Some((_, task)) = tl.pop_due(until) {
            if task == Task::CelebrationBurst && c.on_tick(tl) {
                bursts += 1;
            }
        }
        tl.settle(until);
        bursts
    }

    #[test]
    fn eleven_bursts_then_stops() {
        let mut c = Celebration::new(11);
        let mut tl = Timeline::new();
        assert!(c.start(&mut tl, 300.0));
        assert_eq!(c.fired(), 1);

        assert_eq!(run(&mut c, &mut tl, 2999.0), 9);
        assert!(c.is_running());
        assert_eq!(run(&mut c, &mut tl, 3000.0), 1);
        assert_eq!(c.fired(), 11);
        assert!(!c.is_running());
        assert!(tl.is_empty());

        assert_eq!(run(&mut c, &mut tl, 60_000.0), 0);
        assert_eq!(c.fired(), 11);
    }

    #[test]
    fn one_huge_tick_still_stops_at_eleven() {
        let mut c = Celebration::new(11);
        let mut tl = Timeline::new();
        c.start(&mut tl, 300.0);
        assert_eq!(run(&mut c, &mut tl, 1_000_000.0), 10);
        assert_eq!(c.fired(), 11);
    }

    #[test]
    fn restart_is_refused() {
        let mut c = Celebration::new(11);
        let mut tl = Timeline::new();
        assert!(c.start(&mut tl, 300.0));
        assert!(!c.start(&mut tl, 300.0));
        assert_eq!(tl.len(), 1);
    }

    #[test]
    fn single_burst_needs_no_timer() {
        let mut c = Celebration::new(1);
        let mut tl = Timeline::new();
        c.start(&mut tl, 300.0);
        assert!(!c.is_running());
        assert!(tl.is_empty());
    }
}
