use super::{run_to_completion, validate, Process, ScheduleResult, Scheduler};

/// First-come-first-served: submission order is run order.
pub struct FcfsScheduler;

impl Scheduler for FcfsScheduler {
    const NAME: &'static str = "First-Come-First-Served";

    fn schedule(&self, processes: &[Process]) -> ScheduleResult<Vec<Process>> {
        validate(processes)?;
        Ok(run_to_completion(processes.to_vec()))
    }
}
