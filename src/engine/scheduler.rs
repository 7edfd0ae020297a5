//! Delayed tasks for a single-threaded event loop
//!
//! Nothing here runs on its own: the owner calls [`Scheduler::drain_due`]
//! every turn of its loop and performs whatever comes back. Tasks due at
//! the same instant come back in the order they were scheduled.

use std::time::{Duration, Instant};

/// Longest delay honoured; anything later is clamped to it.
pub const MAX_DELAY: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Identifies one scheduled task so it can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

struct Entry<T> {
    due: Instant,
    id: u64,
    task: T,
}

pub struct Scheduler<T> {
    /// Sorted by (due, id)
    queue: Vec<Entry<T>>,
    next_id: u64,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            queue: Vec::new(),
            next_id: 0,
        }
    }

    /// Run `task` once `delay` has passed since `now`. Delays past
    /// [`MAX_DELAY`] are clamped to it.
    pub fn schedule(&mut self, now: Instant, delay: Duration, task: T) -> TaskHandle {
        let delay = delay.min(MAX_DELAY);
        let due = now.checked_add(delay).unwrap_or(now);
        self.schedule_at(due, task)
    }

    pub fn schedule_at(&mut self, due: Instant, task: T) -> TaskHandle {
        let id = self.next_id;
        self.next_id += 1;

        let index = self.queue.partition_point(|e| (e.due, e.id) <= (due, id));
        self.queue.insert(index, Entry { due, id, task });

        TaskHandle(id)
    }

    /// Drop a task before it fires. Returns `false` if it already fired or
    /// was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        match self.queue.iter().position(|e| e.id == handle.0) {
            Some(index) => {
                self.queue.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove and return every task due at or before `now`, earliest first.
    pub fn drain_due(&mut self, now: Instant) -> Vec<T> {
        let ready = self.queue.partition_point(|e| e.due <= now);
        self.queue.drain(..ready).map(|e| e.task).collect()
    }

    /// When the earliest pending task is due.
    pub fn next_due(&self) -> Option<Instant> {
        self.queue.first().map(|e| e.due)
    }

    /// Pending tasks with their due instants, earliest first.
    pub fn pending(&self) -> impl Iterator<Item = (Instant, &T)> {
        self.queue.iter().map(|e| (e.due, &e.task))
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Forget every pending task.
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_due_order() {
        let now = Instant::now();
        let mut timers = Scheduler::new();
        timers.schedule(now, Duration::from_millis(600), 'c');
        timers.schedule(now, Duration::ZERO, 'a');
        timers.schedule(now, Duration::from_millis(300), 'b');

        assert_eq!(timers.drain_due(now), ['a']);
        assert_eq!(timers.drain_due(now + Duration::from_millis(299)), Vec::<char>::new());
        assert_eq!(timers.drain_due(now + Duration::from_millis(1000)), ['b', 'c']);
        assert!(timers.is_empty());
    }

    #[test]
    fn same_instant_keeps_insertion_order() {
        let now = Instant::now();
        let mut timers = Scheduler::new();
        for i in 0..5 {
            timers.schedule(now, Duration::from_millis(200), i);
        }

        assert_eq!(timers.drain_due(now + Duration::from_millis(200)), [0, 1, 2, 3, 4]);
    }

    #[test]
    fn cancelled_tasks_never_fire() {
        let now = Instant::now();
        let mut timers = Scheduler::new();
        let keep = timers.schedule(now, Duration::from_millis(10), "keep");
        let drop = timers.schedule(now, Duration::from_millis(10), "drop");

        assert!(timers.cancel(drop));
        assert!(!timers.cancel(drop));
        assert_eq!(timers.drain_due(now + Duration::from_secs(1)), ["keep"]);
        assert!(!timers.cancel(keep));
    }

    #[test]
    fn far_future_delays_are_clamped() {
        let now = Instant::now();
        let mut timers = Scheduler::new();
        timers.schedule(now, Duration::MAX, "late");
        timers.schedule(now, Duration::from_millis(5), "soon");

        assert_eq!(timers.next_due(), Some(now + Duration::from_millis(5)));
        let due: Vec<Instant> = timers.pending().map(|(due, _)| due).collect();
        assert_eq!(due[1], now + MAX_DELAY);
        assert_eq!(timers.drain_due(now + Duration::from_secs(3600)), ["soon"]);
    }

    #[test]
    fn next_due_is_earliest() {
        let now = Instant::now();
        let mut timers = Scheduler::new();
        assert_eq!(timers.next_due(), None);

        timers.schedule(now, Duration::from_millis(500), ());
        timers.schedule(now, Duration::from_millis(100), ());

        assert_eq!(timers.next_due(), Some(now + Duration::from_millis(100)));
        assert_eq!(timers.len(), 2);

        timers.clear();
        assert!(timers.is_empty());
    }
}
