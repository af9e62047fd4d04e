mod display;
mod error;
mod fcfs;
mod priority;
mod process;
mod round_robin;
mod runner;
mod sjf;
pub mod stats;
mod task;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub use error::{ScheduleError, ScheduleResult};
pub use fcfs::FcfsScheduler;
pub use priority::PriorityScheduler;
pub use process::{Pid, Priority, Process, Ticks};
pub use round_robin::RoundRobinScheduler;
pub use runner::{RunnerEvent, ScheduleRunner};
pub use sjf::ShortestJobFirstScheduler;
pub use task::ScheduleTask;

pub const DEFAULT_TIME_QUANTUM: Ticks = 2;

pub trait Scheduler {
    const NAME: &'static str;

    /// Schedules a working copy of `processes`; the caller's records are left untouched.
    fn schedule(&self, processes: &[Process]) -> ScheduleResult<Vec<Process>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Discipline {
    Fcfs,
    #[serde(alias = "sjf")]
    ShortestJobFirst,
    Priority,
    #[serde(alias = "rr")]
    RoundRobin,
}

impl Discipline {
    pub const ALL: [Discipline; 4] = [
        Discipline::Fcfs,
        Discipline::ShortestJobFirst,
        Discipline::Priority,
        Discipline::RoundRobin,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Discipline::Fcfs => FcfsScheduler::NAME,
            Discipline::ShortestJobFirst => ShortestJobFirstScheduler::NAME,
            Discipline::Priority => PriorityScheduler::NAME,
            Discipline::RoundRobin => RoundRobinScheduler::NAME,
        }
    }

    /// Only Priority scheduling asks the user for per-process priorities.
    pub fn requires_priority(self) -> bool {
        self == Discipline::Priority
    }

    pub fn next(self) -> Self {
        let index = self.index();
        Discipline::ALL[(index + 1) % Discipline::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let index = self.index();
        Discipline::ALL[(index + Discipline::ALL.len() - 1) % Discipline::ALL.len()]
    }

    fn index(self) -> usize {
        Discipline::ALL
            .iter()
            .position(|&discipline| discipline == self)
            .unwrap_or(0)
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Discipline {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "fcfs" | "first-come-first-served" => Ok(Discipline::Fcfs),
            "sjf" | "shortest-job-first" => Ok(Discipline::ShortestJobFirst),
            "priority" => Ok(Discipline::Priority),
            "rr" | "round-robin" => Ok(Discipline::RoundRobin),
            _ => Err(ScheduleError::UnknownAlgorithm(s.to_owned())),
        }
    }
}

/// Outcome of one engine call: the emitted records in the order they ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    discipline: Discipline,
    time_quantum: Option<Ticks>,
    processes: Vec<Process>,
}

/// Serializable summary handed to front ends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleReport {
    pub discipline: Discipline,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_quantum: Option<Ticks>,
    pub processes: Vec<Process>,
    pub completions: Vec<Process>,
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
}

impl Schedule {
    pub fn discipline(&self) -> Discipline {
        self.discipline
    }

    /// The quantum the schedule was produced with; `None` unless Round-Robin.
    pub fn time_quantum(&self) -> Option<Ticks> {
        self.time_quantum
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn into_processes(self) -> Vec<Process> {
        self.processes
    }

    pub fn average_waiting_time(&self) -> ScheduleResult<f64> {
        stats::average_waiting_time(&self.processes)
    }

    pub fn average_turnaround_time(&self) -> ScheduleResult<f64> {
        stats::average_turnaround_time(&self.processes)
    }

    pub fn completions(&self) -> Vec<Process> {
        stats::completions(&self.processes)
    }

    pub fn report(&self) -> ScheduleResult<ScheduleReport> {
        Ok(ScheduleReport {
            discipline: self.discipline,
            time_quantum: self.time_quantum,
            processes: self.processes.clone(),
            completions: self.completions(),
            average_waiting_time: self.average_waiting_time()?,
            average_turnaround_time: self.average_turnaround_time()?,
        })
    }
}

/// Runs `processes` through exactly one discipline.
///
/// `time_quantum` is only read by Round-Robin, which falls back to
/// [`DEFAULT_TIME_QUANTUM`] when it is `None`.
pub fn run(
    discipline: Discipline,
    processes: &[Process],
    time_quantum: Option<Ticks>,
) -> ScheduleResult<Schedule> {
    let (scheduled, time_quantum) = match discipline {
        Discipline::Fcfs => (FcfsScheduler.schedule(processes)?, None),
        Discipline::ShortestJobFirst => (ShortestJobFirstScheduler.schedule(processes)?, None),
        Discipline::Priority => (PriorityScheduler.schedule(processes)?, None),
        Discipline::RoundRobin => {
            let scheduler = match time_quantum {
                Some(quantum) => RoundRobinScheduler::with_time_quantum(quantum)?,
                None => RoundRobinScheduler::new(),
            };
            (
                scheduler.schedule(processes)?,
                Some(scheduler.time_quantum()),
            )
        }
    };

    info!(
        "{} scheduled {} processes into {} records",
        discipline,
        processes.len(),
        scheduled.len()
    );

    Ok(Schedule {
        discipline,
        time_quantum,
        processes: scheduled,
    })
}

// Every burst must be positive and the whole batch must fit on the clock, so no
// scheduler can overflow `Ticks` while charging records.
fn validate(processes: &[Process]) -> ScheduleResult<()> {
    let mut total: Ticks = 0;
    for process in processes {
        let invalid = || ScheduleError::InvalidBurstTime {
            pid: process.pid(),
            value: process.burst_time().to_string(),
        };
        if process.burst_time() == 0 {
            return Err(invalid());
        }
        total = total.checked_add(process.burst_time()).ok_or_else(invalid)?;
    }
    Ok(())
}

// Charges each process its whole burst, back to back, in the given order.
fn run_to_completion(mut processes: Vec<Process>) -> Vec<Process> {
    let mut clock: Ticks = 0;
    for process in &mut processes {
        let service = process.burst_time();
        process.charge(clock, service);
        debug!(
            "pid {} runs [{}, {})",
            process.pid(),
            clock,
            clock + service
        );
        clock += service;
    }
    processes
}
