//! Reductions over an emitted schedule.
//!
//! Averages count every record they are given. A Round-Robin schedule holds one record
//! per slice, so a process that needed several quanta is counted once per slice. Use
//! [`completions`] first for per-process figures.

use super::{Process, ScheduleError, ScheduleResult, Ticks};
use std::collections::HashMap;

pub fn average_waiting_time(processes: &[Process]) -> ScheduleResult<f64> {
    mean(processes, Process::waiting_time)
}

pub fn average_turnaround_time(processes: &[Process]) -> ScheduleResult<f64> {
    mean(processes, Process::turnaround_time)
}

/// The last record of every pid, in completion order.
pub fn completions(processes: &[Process]) -> Vec<Process> {
    let last_index: HashMap<_, _> = processes
        .iter()
        .enumerate()
        .map(|(index, process)| (process.pid(), index))
        .collect();

    processes
        .iter()
        .enumerate()
        .filter(|(index, process)| last_index[&process.pid()] == *index)
        .map(|(_, process)| process.clone())
        .collect()
}

fn mean(processes: &[Process], field: impl Fn(&Process) -> Ticks) -> ScheduleResult<f64> {
    if processes.is_empty() {
        return Err(ScheduleError::EmptyInputAggregation);
    }
    let total: u128 = processes
        .iter()
        .map(|process| u128::from(field(process)))
        .sum();
    Ok(total as f64 / processes.len() as f64)
}
