use super::{run_to_completion, validate, Process, ScheduleResult, Scheduler};

/// Non-preemptive priority scheduling. A lower value is more urgent, and negative
/// values are allowed.
pub struct PriorityScheduler;

impl Scheduler for PriorityScheduler {
    const NAME: &'static str = "Priority";

    fn schedule(&self, processes: &[Process]) -> ScheduleResult<Vec<Process>> {
        validate(processes)?;

        let mut sorted = processes.to_vec();
        sorted.sort_by_key(Process::priority);
        Ok(run_to_completion(sorted))
    }
}
