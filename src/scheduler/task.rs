use super::{run, Discipline, Process, ScheduleReport, ScheduleResult, Ticks};
use log::debug;
use std::{
    any::Any,
    panic,
    sync::mpsc::{self, Receiver},
    thread::{self, JoinHandle},
};

/// One engine call running off the caller's thread.
///
/// The engine itself stays synchronous; this only keeps a front end responsive while
/// it waits for the report.
pub struct ScheduleTask {
    discipline: Discipline,
    result_rx: Receiver<ScheduleResult<ScheduleReport>>,
    handle: JoinHandle<()>,
}

impl ScheduleTask {
    pub fn spawn(
        discipline: Discipline,
        processes: Vec<Process>,
        time_quantum: Option<Ticks>,
    ) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        let handle = thread::spawn(move || {
            let result =
                run(discipline, &processes, time_quantum).and_then(|schedule| schedule.report());
            // The receiver may already be gone if the front end moved on
            let _ = result_tx.send(result);
        });
        debug!("spawned {} scheduling task", discipline);

        Self {
            discipline,
            result_rx,
            handle,
        }
    }

    pub fn discipline(&self) -> Discipline {
        self.discipline
    }

    /// Returns the result once it is ready, without blocking. The result is handed out
    /// once; drop the task after it has been taken.
    pub fn try_result(&self) -> Option<ScheduleResult<ScheduleReport>> {
        self.result_rx.try_recv().ok()
    }

    pub fn wait(self) -> ScheduleResult<ScheduleReport> {
        if let Ok(result) = self.result_rx.recv() {
            return result;
        }

        // The engine panicked, or `try_result` already handed the result out
        let payload: Box<dyn Any + Send> = match self.handle.join() {
            Err(payload) => payload,
            Ok(()) => Box::new("scheduling task result was already taken"),
        };
        panic::resume_unwind(payload)
    }
}
