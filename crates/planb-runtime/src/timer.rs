use std::time::{Duration, Instant};

/// Identifies one scheduled task of a [`TimerSlot`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone, Copy)]
struct ScheduledTask {
    handle: TaskHandle,
    deadline: Instant,
}

/// Holder for at most one pending deadline.
///
/// Scheduling always cancels the previous task first, so only the most
/// recently scheduled task can fire. Nothing runs by itself: the owner polls
/// with the current time.
#[derive(Debug, Default)]
pub struct TimerSlot {
    next_id: u64,
    pending: Option<ScheduledTask>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration) -> TaskHandle {
        self.cancel();
        self.next_id += 1;
        let handle = TaskHandle(self.next_id);
        self.pending = Some(ScheduledTask {
            handle,
            deadline: now + delay,
        });
        handle
    }

    /// Drop the pending task, returning its handle if there was one.
    pub fn cancel(&mut self) -> Option<TaskHandle> {
        self.pending.take().map(|task| task.handle)
    }

    pub fn handle(&self) -> Option<TaskHandle> {
        self.pending.map(|task| task.handle)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|task| task.deadline)
    }

    /// Whether a task is pending and has not reached its deadline at `at`.
    pub fn is_armed_at(&self, at: Instant) -> bool {
        self.pending.is_some_and(|task| task.deadline > at)
    }

    /// Consume the pending task if its deadline has passed.
    pub fn fire_if_due(&mut self, now: Instant) -> Option<(TaskHandle, Instant)> {
        match self.pending {
            Some(task) if task.deadline <= now => {
                self.pending = None;
                Some((task.handle, task.deadline))
            }
            _ => None,
        }
    }
}
