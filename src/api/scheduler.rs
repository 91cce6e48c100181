use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Fixed period of the automatic advance.
pub const ANIMATION_TICK_INTERVAL: Duration = Duration::from_millis(2000);

/// Identity of one scheduled repeating tick.
///
/// Every tick is delivered with the id it was scheduled under, so the
/// controller can drop ticks from a task it already cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task#{}", self.0)
    }
}

/// Source of repeating, cancellable ticks.
pub trait TickScheduler {
    /// Cancellation token for one scheduled task.
    type Handle;

    /// Starts delivering `task` every `interval` until cancelled.
    fn schedule_repeating(&mut self, task: TaskId, interval: Duration) -> Self::Handle;

    /// Stops the task; no tick for it is delivered afterwards.
    fn cancel(&mut self, handle: Self::Handle);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ManualTask {
    task: TaskId,
    interval: Duration,
    next_due: Duration,
}

/// Virtual-clock scheduler for headless runs and tests.
///
/// Nothing fires on its own: the host moves the clock forward and pulls due
/// ticks one at a time, so a cancellation made while handling one tick is
/// honored before the next is produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualTickScheduler {
    now: Duration,
    tasks: Vec<ManualTask>,
    scheduled_total: usize,
    cancelled_total: usize,
}

/// Handle returned by [`ManualTickScheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ManualTickHandle(TaskId);

impl ManualTickScheduler {
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_pending(&self, task: TaskId) -> bool {
        self.tasks.iter().any(|entry| entry.task == task)
    }

    #[must_use]
    pub fn scheduled_total(&self) -> usize {
        self.scheduled_total
    }

    #[must_use]
    pub fn cancelled_total(&self) -> usize {
        self.cancelled_total
    }

    /// Pops the earliest tick due at or before `deadline`, moving the clock to it.
    pub fn next_due(&mut self, deadline: Duration) -> Option<TaskId> {
        let entry = self
            .tasks
            .iter_mut()
            .filter(|entry| entry.next_due <= deadline)
            .min_by_key(|entry| (entry.next_due, entry.task))?;
        self.now = self.now.max(entry.next_due);
        entry.next_due += entry.interval;
        trace!(task = %entry.task, now_ms = self.now.as_millis(), "manual tick due");
        Some(entry.task)
    }

    /// Moves the clock to `deadline` once no more ticks are due before it.
    pub fn settle(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }
}

impl TickScheduler for ManualTickScheduler {
    type Handle = ManualTickHandle;

    fn schedule_repeating(&mut self, task: TaskId, interval: Duration) -> ManualTickHandle {
        // A zero interval would make `next_due` spin forever.
        let interval = interval.max(Duration::from_millis(1));
        self.tasks.push(ManualTask {
            task,
            interval,
            next_due: self.now + interval,
        });
        self.scheduled_total += 1;
        ManualTickHandle(task)
    }

    fn cancel(&mut self, handle: ManualTickHandle) {
        let before = self.tasks.len();
        self.tasks.retain(|entry| entry.task != handle.0);
        if self.tasks.len() != before {
            self.cancelled_total += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{ManualTickScheduler, TaskId, TickScheduler};

    #[test]
    fn repeating_task_fires_once_per_interval() {
        let mut scheduler = ManualTickScheduler::default();
        scheduler.schedule_repeating(TaskId(1), Duration::from_millis(100));

        let deadline = Duration::from_millis(350);
        let mut fired = Vec::new();
        while let Some(task) = scheduler.next_due(deadline) {
            fired.push((task, scheduler.now().as_millis()));
        }
        scheduler.settle(deadline);

        assert_eq!(
            fired,
            vec![(TaskId(1), 100), (TaskId(1), 200), (TaskId(1), 300)]
        );
        assert_eq!(scheduler.now(), deadline);
    }

    #[test]
    fn cancelled_task_never_fires() {
        let mut scheduler = ManualTickScheduler::default();
        let handle = scheduler.schedule_repeating(TaskId(7), Duration::from_millis(10));
        scheduler.cancel(handle);

        assert_eq!(scheduler.next_due(Duration::from_secs(1)), None);
        assert_eq!(scheduler.pending_count(), 0);
        assert_eq!(scheduler.cancelled_total(), 1);
    }
}
