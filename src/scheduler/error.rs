use super::process::Pid;

pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Everything that can stop a simulation attempt.
///
/// Each case is terminal for the attempt and reported as-is, so a front end can tell the
/// user exactly which value to correct.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("invalid process count `{0}`: expected a positive integer")]
    InvalidProcessCount(String),

    #[error("invalid burst time `{value}` for process {pid}: expected a positive integer")]
    InvalidBurstTime { pid: Pid, value: String },

    #[error("invalid priority `{value}` for process {pid}: expected an integer")]
    InvalidPriority { pid: Pid, value: String },

    #[error("invalid time quantum `{0}`: expected a positive integer")]
    InvalidQuantum(String),

    #[error("unknown scheduling algorithm `{0}`")]
    UnknownAlgorithm(String),

    #[error("cannot average over an empty schedule")]
    EmptyInputAggregation,
}
