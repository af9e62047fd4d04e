use super::{run_to_completion, validate, Process, ScheduleResult, Scheduler};

/// Non-preemptive shortest-job-first.
pub struct ShortestJobFirstScheduler;

impl Scheduler for ShortestJobFirstScheduler {
    const NAME: &'static str = "Shortest-Job-First";

    fn schedule(&self, processes: &[Process]) -> ScheduleResult<Vec<Process>> {
        validate(processes)?;

        // Stable, so equal bursts keep submission order
        let mut sorted = processes.to_vec();
        sorted.sort_by_key(Process::burst_time);
        Ok(run_to_completion(sorted))
    }
}
