pub mod cli;
pub mod config;
pub mod input;
pub mod output;
pub mod scheduler;

pub use scheduler::{run, Discipline, Process, Schedule, ScheduleError, ScheduleReport, Scheduler};
