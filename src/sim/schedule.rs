//! Delayed transitions driven by the host timer
//!
//! Every task is tagged with the epoch it was scheduled under. Bumping the
//! state's epoch purges older tasks; anything that still surfaces with a
//! mismatched tag is discarded by the tick loop.

use serde::{Deserialize, Serialize};

/// A timed transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Task {
    /// Light the next signal of the playback, or open input once all are shown
    PlaybackStep,
    /// Turn off the signal lit by playback step `position`, if still lit
    ClearHighlight { position: usize },
    /// Append a signal and replay the extended sequence
    AdvanceRound,
}

/// A task waiting for its due time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheduled {
    /// Clock time (ms) at which the task fires
    pub due_ms: u64,
    /// Insertion counter, breaks ties so equal due times fire in schedule order
    pub order: u64,
    /// Epoch the task belongs to
    pub epoch: u64,
    pub task: Task,
}

/// Pending tasks, kept sorted by (due time, insertion order)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    pending: Vec<Scheduled>,
    next_order: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` to fire at `due_ms`
    pub fn schedule(&mut self, due_ms: u64, epoch: u64, task: Task) {
        let entry = Scheduled {
            due_ms,
            order: self.next_order,
            epoch,
            task,
        };
        self.next_order += 1;

        let pos = self
            .pending
            .iter()
            .position(|s| (s.due_ms, s.order) > (entry.due_ms, entry.order))
            .unwrap_or(self.pending.len());
        self.pending.insert(pos, entry);
    }

    /// Remove and return the earliest task due at or before `now_ms`
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Scheduled> {
        match self.pending.first() {
            Some(first) if first.due_ms <= now_ms => Some(self.pending.remove(0)),
            _ => None,
        }
    }

    /// Drop every task not belonging to `epoch`
    pub fn cancel_stale(&mut self, epoch: u64) {
        self.pending.retain(|s| s.epoch == epoch);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Whether this task is queued
    #[cfg(test)]
    pub fn contains(&self, task: Task) -> bool {
        self.pending.iter().any(|s| s.task == task)
    }

    /// Due time of the earliest pending task
    #[cfg(test)]
    pub fn next_due(&self) -> Option<u64> {
        self.pending.first().map(|s| s.due_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_in_due_then_insertion_order() {
        let mut sched = Scheduler::new();
        sched.schedule(600, 1, Task::PlaybackStep);
        sched.schedule(400, 1, Task::ClearHighlight { position: 0 });
        sched.schedule(600, 1, Task::AdvanceRound);

        assert_eq!(sched.next_due(), Some(400));
        assert!(sched.pop_due(399).is_none());
        assert_eq!(sched.pop_due(1000).map(|s| s.task), Some(Task::ClearHighlight { position: 0 }));
        assert_eq!(sched.pop_due(1000).map(|s| s.task), Some(Task::PlaybackStep));
        assert_eq!(sched.pop_due(1000).map(|s| s.task), Some(Task::AdvanceRound));
        assert!(sched.is_empty());
    }

    #[test]
    fn test_cancel_stale_keeps_current_epoch() {
        let mut sched = Scheduler::new();
        sched.schedule(100, 1, Task::PlaybackStep);
        sched.schedule(200, 2, Task::ClearHighlight { position: 0 });
        sched.cancel_stale(2);

        assert_eq!(sched.len(), 1);
        assert!(sched.contains(Task::ClearHighlight { position: 0 }));
        assert!(!sched.contains(Task::PlaybackStep));
    }
}
