use super::{
    validate, Process, ScheduleError, ScheduleResult, Scheduler, Ticks, DEFAULT_TIME_QUANTUM,
};
use log::debug;

/// Preemptive round-robin with a fixed quantum.
///
/// Every round walks the ready list front to back and gives each process still in it
/// one quantum. Unfinished processes keep their place in the list for the next round
/// instead of being requeued at the back. Finished ones are dropped.
///
/// One record is emitted per slice, in the order the slices ran. A slice's
/// `waiting_time` is the clock when it started, its `turnaround_time` the clock when
/// it stopped, and its `burst_time` what the process still needed at the start. The
/// last slice of a pid holds that process's real completion figures.
pub struct RoundRobinScheduler {
    time_quantum: Ticks,
}

impl RoundRobinScheduler {
    pub fn new() -> Self {
        Self {
            time_quantum: DEFAULT_TIME_QUANTUM,
        }
    }

    pub fn with_time_quantum(time_quantum: Ticks) -> ScheduleResult<Self> {
        if time_quantum == 0 {
            return Err(ScheduleError::InvalidQuantum(time_quantum.to_string()));
        }
        Ok(Self { time_quantum })
    }

    pub fn time_quantum(&self) -> Ticks {
        self.time_quantum
    }
}

impl Default for RoundRobinScheduler {
    fn default() -> Self {
        RoundRobinScheduler::new()
    }
}

impl Scheduler for RoundRobinScheduler {
    const NAME: &'static str = "Round-Robin";

    fn schedule(&self, processes: &[Process]) -> ScheduleResult<Vec<Process>> {
        validate(processes)?;

        let mut ready = processes.to_vec();
        let mut slices = Vec::new();
        let mut clock: Ticks = 0;
        let mut round = 0;

        while !ready.is_empty() {
            round += 1;
            ready.retain_mut(|process| {
                let service = process.burst_time().min(self.time_quantum);
                process.charge(clock, service);
                slices.push(process.clone());
                debug!(
                    "round {}: pid {} runs [{}, {}), {} left",
                    round,
                    process.pid(),
                    clock,
                    clock + service,
                    process.burst_time() - service
                );
                clock += service;

                if process.burst_time() > self.time_quantum {
                    process.consume(self.time_quantum);
                    true
                } else {
                    false
                }
            });
        }

        Ok(slices)
    }
}
