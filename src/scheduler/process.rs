use serde::Serialize;

pub type Pid = u32;
pub type Ticks = u64;
pub type Priority = i32;

/// One simulated workload unit.
///
/// `pid`, `priority` and the submitted burst are fixed by whoever builds the batch.
/// `waiting_time` and `turnaround_time` are only ever written by a scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Process {
    pid: Pid,
    burst_time: Ticks,
    priority: Priority,
    waiting_time: Ticks,
    turnaround_time: Ticks,
}

impl Process {
    pub const DEFAULT_PRIORITY: Priority = 0;

    pub fn new(pid: Pid, burst_time: Ticks) -> Self {
        Process::with_priority(pid, burst_time, Process::DEFAULT_PRIORITY)
    }

    pub fn with_priority(pid: Pid, burst_time: Ticks, priority: Priority) -> Self {
        Self {
            pid,
            burst_time,
            priority,
            waiting_time: 0,
            turnaround_time: 0,
        }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    /// Remaining burst: the submitted burst, except on Round-Robin slices where it is
    /// what was left when the slice started.
    pub fn burst_time(&self) -> Ticks {
        self.burst_time
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn waiting_time(&self) -> Ticks {
        self.waiting_time
    }

    pub fn turnaround_time(&self) -> Ticks {
        self.turnaround_time
    }

    /// CPU time charged to this record.
    pub fn service_time(&self) -> Ticks {
        self.turnaround_time - self.waiting_time
    }

    // Records a run of `service` ticks starting at `start`.
    pub(super) fn charge(&mut self, start: Ticks, service: Ticks) {
        self.waiting_time = start;
        self.turnaround_time = start + service;
    }

    pub(super) fn consume(&mut self, service: Ticks) {
        self.burst_time -= service;
    }
}
