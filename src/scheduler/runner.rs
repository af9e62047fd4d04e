use super::{
    display::DisplayTerminal, Discipline, Process, ScheduleReport, ScheduleResult, ScheduleTask,
    Ticks,
};
use log::debug;
use std::io;

pub enum RunnerEvent {
    Quit,
    Next,
    Previous,
    None,
}

pub struct ScheduleRunner {
    terminal: DisplayTerminal,
    processes: Vec<Process>,
    time_quantum: Option<Ticks>,
    discipline: Discipline,
    pending: Option<ScheduleTask>,
    outcome: Option<ScheduleResult<ScheduleReport>>,
}

impl ScheduleRunner {
    pub fn new(
        processes: Vec<Process>,
        discipline: Discipline,
        time_quantum: Option<Ticks>,
    ) -> Result<Self, io::Error> {
        let terminal = DisplayTerminal::new()?;

        let mut runner = Self {
            terminal,
            processes,
            time_quantum,
            discipline,
            pending: None,
            outcome: None,
        };
        runner.submit(discipline);
        Ok(runner)
    }

    fn submit(&mut self, discipline: Discipline) {
        debug!("switching view to {}", discipline);
        self.discipline = discipline;
        self.outcome = None;
        self.pending = Some(ScheduleTask::spawn(
            discipline,
            self.processes.clone(),
            self.time_quantum,
        ));
    }

    fn collect(&mut self) {
        if let Some(task) = &self.pending {
            if let Some(result) = task.try_result() {
                self.outcome = Some(result);
                self.pending = None;
            }
        }
    }

    // Returns false if the program should quit
    pub fn run(&mut self) -> Result<bool, io::Error> {
        self.collect();
        self.terminal.draw(self.discipline, self.outcome.as_ref())?;

        match self.terminal.get_input() {
            RunnerEvent::Quit => return Ok(false),
            RunnerEvent::Next => self.submit(self.discipline.next()),
            RunnerEvent::Previous => self.submit(self.discipline.previous()),
            RunnerEvent::None => {}
        }
        Ok(true)
    }
}
