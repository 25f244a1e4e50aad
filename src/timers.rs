//! Virtual clock, scheduled tasks, and rate limiters.
//!
//! Everything is single-threaded and driven by the page's event loop: a
//! [`TimerQueue`] holds deferred work keyed by a millisecond deadline, and the
//! root initializer drains it as time advances. Nothing blocks; a task whose
//! element has since been removed simply finds nothing to do.
//!
//! | Primitive | Edge | Behavior |
//! |---|---|---|
//! | [`Throttle`] | leading | first call runs, calls inside the window are dropped |
//! | [`Debounce`] | trailing | bursts collapse into one call after a quiet period |

use crate::dom::ElementId;

/// Deferred work scheduled by a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Start the fade-out animation of a notification banner.
    FadeOutNotification(ElementId),
    /// Detach a transient element (ripple, faded notification).
    RemoveElement(ElementId),
}

#[derive(Debug, Clone)]
struct Scheduled {
    due: u64,
    seq: u64,
    task: Task,
}

/// Millisecond clock plus pending tasks.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    now: u64,
    seq: u64,
    pending: Vec<Scheduled>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn schedule(&mut self, delay_ms: u64, task: Task) {
        self.seq += 1;
        self.pending.push(Scheduled {
            due: self.now.saturating_add(delay_ms),
            seq: self.seq,
            task,
        });
    }

    /// Deadline of the earliest pending task.
    pub fn next_due(&self) -> Option<u64> {
        self.pending.iter().map(|s| s.due).min()
    }

    /// Pop the earliest task due at or before `until`, moving the clock to its
    /// deadline. Ties run in scheduling order.
    pub fn pop_due(&mut self, until: u64) -> Option<Task> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due <= until)
            .min_by_key(|(_, s)| (s.due, s.seq))
            .map(|(i, _)| i)?;
        let scheduled = self.pending.remove(index);
        self.now = self.now.max(scheduled.due);
        Some(scheduled.task)
    }

    /// Move the clock forward without running anything.
    pub fn set_now(&mut self, now: u64) {
        self.now = self.now.max(now);
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

/// Leading-edge rate limiter: at most one call per interval.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval_ms: u64,
    blocked_until: Option<u64>,
}

impl Throttle {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            blocked_until: None,
        }
    }

    /// Returns true if the call may run now; opens a new quiet window if so.
    pub fn try_fire(&mut self, now: u64) -> bool {
        match self.blocked_until {
            Some(until) if now < until => false,
            _ => {
                self.blocked_until = Some(now.saturating_add(self.interval_ms));
                true
            }
        }
    }
}

/// Trailing-edge debouncer.
#[derive(Debug, Clone)]
pub struct Debounce {
    wait_ms: u64,
    deadline: Option<u64>,
}

impl Debounce {
    pub fn new(wait_ms: u64) -> Self {
        Self {
            wait_ms,
            deadline: None,
        }
    }

    /// Record a call, pushing the deadline out by the full wait.
    pub fn call(&mut self, now: u64) {
        self.deadline = Some(now.saturating_add(self.wait_ms));
    }

    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// True exactly once when the quiet period has elapsed.
    pub fn poll(&mut self, now: u64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    fn ids(n: usize) -> Vec<ElementId> {
        let mut doc = Document::new();
        (0..n).map(|_| doc.create_element("span")).collect()
    }

    #[test]
    fn tasks_run_in_deadline_order() {
        let ids = ids(2);
        let mut timers = TimerQueue::new();
        timers.schedule(600, Task::RemoveElement(ids[0]));
        timers.schedule(300, Task::RemoveElement(ids[1]));

        assert_eq!(timers.pop_due(1000), Some(Task::RemoveElement(ids[1])));
        assert_eq!(timers.now(), 300);
        assert_eq!(timers.pop_due(1000), Some(Task::RemoveElement(ids[0])));
        assert_eq!(timers.now(), 600);
        assert_eq!(timers.pop_due(1000), None);
    }

    #[test]
    fn ties_run_in_scheduling_order() {
        let ids = ids(2);
        let mut timers = TimerQueue::new();
        timers.schedule(100, Task::FadeOutNotification(ids[0]));
        timers.schedule(100, Task::RemoveElement(ids[1]));
        assert_eq!(timers.pop_due(100), Some(Task::FadeOutNotification(ids[0])));
        assert_eq!(timers.pop_due(100), Some(Task::RemoveElement(ids[1])));
    }

    #[test]
    fn tasks_not_yet_due_stay_pending() {
        let ids = ids(1);
        let mut timers = TimerQueue::new();
        timers.schedule(3000, Task::FadeOutNotification(ids[0]));
        assert_eq!(timers.pop_due(2999), None);
        assert_eq!(timers.pending(), 1);
        assert_eq!(timers.next_due(), Some(3000));
    }

    #[test]
    fn delays_are_relative_to_current_time() {
        let ids = ids(1);
        let mut timers = TimerQueue::new();
        timers.set_now(500);
        timers.schedule(100, Task::RemoveElement(ids[0]));
        assert_eq!(timers.next_due(), Some(600));
    }

    #[test]
    fn throttle_runs_leading_edge_and_drops_inside_window() {
        let mut throttle = Throttle::new(16);
        assert!(throttle.try_fire(0));
        assert!(!throttle.try_fire(5));
        assert!(!throttle.try_fire(15));
        assert!(throttle.try_fire(16));
        assert!(!throttle.try_fire(20));
    }

    #[test]
    fn debounce_collapses_burst_into_one_trailing_call() {
        let mut debounce = Debounce::new(250);
        debounce.call(0);
        debounce.call(100);
        debounce.call(200);
        assert!(!debounce.poll(300));
        assert!(debounce.poll(450));
        assert!(!debounce.poll(1000));
    }

    #[test]
    fn deadlines_saturate_at_end_of_clock() {
        let ids = ids(1);
        let mut timers = TimerQueue::new();
        timers.set_now(u64::MAX - 1);
        timers.schedule(3000, Task::FadeOutNotification(ids[0]));
        assert_eq!(timers.next_due(), Some(u64::MAX));
        assert_eq!(timers.pop_due(u64::MAX), Some(Task::FadeOutNotification(ids[0])));

        let mut throttle = Throttle::new(16);
        assert!(throttle.try_fire(u64::MAX - 1));
        assert!(!throttle.try_fire(u64::MAX - 1));

        let mut debounce = Debounce::new(250);
        debounce.call(u64::MAX - 1);
        assert_eq!(debounce.deadline(), Some(u64::MAX));
        assert!(debounce.poll(u64::MAX));
    }

    #[test]
    fn debounce_idle_never_fires() {
        let mut debounce = Debounce::new(250);
        assert!(!debounce.poll(10_000));
        assert_eq!(debounce.deadline(), None);
    }
}
