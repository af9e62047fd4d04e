//! Validation of user-supplied values and the interactive prompts that collect them.

use crate::scheduler::{Discipline, Pid, Priority, Process, ScheduleError, ScheduleResult, Ticks};
use log::warn;
use std::io::{self, BufRead, Write};

pub fn parse_process_count(input: &str) -> ScheduleResult<usize> {
    match input.trim().parse::<usize>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(ScheduleError::InvalidProcessCount(input.trim().to_owned())),
    }
}

pub fn parse_burst_time(pid: Pid, input: &str) -> ScheduleResult<Ticks> {
    match input.trim().parse::<Ticks>() {
        Ok(burst) if burst > 0 => Ok(burst),
        _ => Err(ScheduleError::InvalidBurstTime {
            pid,
            value: input.trim().to_owned(),
        }),
    }
}

pub fn parse_priority(pid: Pid, input: &str) -> ScheduleResult<Priority> {
    input
        .trim()
        .parse::<Priority>()
        .map_err(|_| ScheduleError::InvalidPriority {
            pid,
            value: input.trim().to_owned(),
        })
}

pub fn parse_time_quantum(input: &str) -> ScheduleResult<Ticks> {
    match input.trim().parse::<Ticks>() {
        Ok(quantum) if quantum > 0 => Ok(quantum),
        _ => Err(ScheduleError::InvalidQuantum(input.trim().to_owned())),
    }
}

/// Parses a comma separated burst list such as `24,3,3`. Pids follow list order.
pub fn parse_burst_list(input: &str) -> ScheduleResult<Vec<Ticks>> {
    if input.trim().is_empty() {
        return Err(ScheduleError::InvalidProcessCount("0".to_owned()));
    }
    input
        .split(',')
        .enumerate()
        .map(|(pid, value)| parse_burst_time(pid as Pid, value))
        .collect()
}

pub fn parse_priority_list(input: &str) -> ScheduleResult<Vec<Priority>> {
    input
        .split(',')
        .enumerate()
        .map(|(pid, value)| parse_priority(pid as Pid, value))
        .collect()
}

/// Builds the batch, numbering processes from 0 in input order.
///
/// Without priorities every process gets [`Process::DEFAULT_PRIORITY`]. A priority list
/// must have one entry per burst.
pub fn build_processes(
    bursts: &[Ticks],
    priorities: Option<&[Priority]>,
) -> ScheduleResult<Vec<Process>> {
    if bursts.is_empty() {
        return Err(ScheduleError::InvalidProcessCount("0".to_owned()));
    }
    if let Some(priorities) = priorities {
        if priorities.len() != bursts.len() {
            let pid = priorities.len().min(bursts.len());
            return Err(ScheduleError::InvalidPriority {
                pid: pid as Pid,
                value: format!(
                    "{} priorities for {} processes",
                    priorities.len(),
                    bursts.len()
                ),
            });
        }
    }

    bursts
        .iter()
        .enumerate()
        .map(|(pid, &burst)| {
            let pid = pid as Pid;
            if burst == 0 {
                return Err(ScheduleError::InvalidBurstTime {
                    pid,
                    value: burst.to_string(),
                });
            }
            let priority =
                priorities.map_or(Process::DEFAULT_PRIORITY, |list| list[pid as usize]);
            Ok(Process::with_priority(pid, burst, priority))
        })
        .collect()
}

/// Line-oriented prompts. A rejected answer is reported and asked again, so the
/// caller only sees I/O failures (end of input included).
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn read_process_count(&mut self) -> io::Result<usize> {
        self.ask("Number of processes: ", parse_process_count)
    }

    pub fn read_discipline(&mut self) -> io::Result<Discipline> {
        let choices: Vec<_> = Discipline::ALL.iter().map(|d| d.name()).collect();
        let question = format!("Algorithm ({}): ", choices.join(", "));
        self.ask(&question, str::parse::<Discipline>)
    }

    pub fn read_time_quantum(&mut self, default: Ticks) -> io::Result<Ticks> {
        let question = format!("Time quantum [{}]: ", default);
        self.ask(&question, |answer| {
            if answer.trim().is_empty() {
                Ok(default)
            } else {
                parse_time_quantum(answer)
            }
        })
    }

    /// Asks for every burst, and for every priority when `discipline` needs them.
    pub fn read_processes(
        &mut self,
        count: usize,
        discipline: Discipline,
    ) -> io::Result<Vec<Process>> {
        let mut processes = Vec::with_capacity(count);
        for pid in 0..count as Pid {
            let burst = self.ask(&format!("Burst time for process {}: ", pid), |answer| {
                parse_burst_time(pid, answer)
            })?;
            let process = if discipline.requires_priority() {
                Process::with_priority(pid, burst, self.read_priority(pid)?)
            } else {
                Process::new(pid, burst)
            };
            processes.push(process);
        }
        Ok(processes)
    }

    /// Asks for one priority per pid, for bursts that were given up front.
    pub fn read_priorities(&mut self, count: usize) -> io::Result<Vec<Priority>> {
        (0..count as Pid).map(|pid| self.read_priority(pid)).collect()
    }

    fn read_priority(&mut self, pid: Pid) -> io::Result<Priority> {
        self.ask(&format!("Priority for process {}: ", pid), |answer| {
            parse_priority(pid, answer)
        })
    }

    fn ask<T>(
        &mut self,
        question: &str,
        parse: impl Fn(&str) -> ScheduleResult<T>,
    ) -> io::Result<T> {
        loop {
            write!(self.writer, "{}", question)?;
            self.writer.flush()?;

            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input ended before all values were entered",
                ));
            }

            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(err) => {
                    warn!("rejected input: {}", err);
                    writeln!(self.writer, "{}", err)?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn process_count_must_be_positive() {
        assert_eq!(parse_process_count(" 3\n"), Ok(3));
        assert_eq!(
            parse_process_count("0"),
            Err(ScheduleError::InvalidProcessCount("0".to_owned()))
        );
        assert_eq!(
            parse_process_count("-2"),
            Err(ScheduleError::InvalidProcessCount("-2".to_owned()))
        );
        assert_eq!(
            parse_process_count("three"),
            Err(ScheduleError::InvalidProcessCount("three".to_owned()))
        );
    }

    #[test]
    fn burst_time_must_be_positive() {
        assert_eq!(parse_burst_time(0, "24"), Ok(24));
        assert_eq!(
            parse_burst_time(4, "0"),
            Err(ScheduleError::InvalidBurstTime {
                pid: 4,
                value: "0".to_owned()
            })
        );
        assert!(matches!(
            parse_burst_time(1, "-3"),
            Err(ScheduleError::InvalidBurstTime { pid: 1, .. })
        ));
        assert!(matches!(
            parse_burst_time(1, "2.5"),
            Err(ScheduleError::InvalidBurstTime { pid: 1, .. })
        ));
    }

    #[test]
    fn priority_accepts_any_sign() {
        assert_eq!(parse_priority(0, "-7"), Ok(-7));
        assert_eq!(parse_priority(0, "12"), Ok(12));
        assert_eq!(
            parse_priority(2, "high"),
            Err(ScheduleError::InvalidPriority {
                pid: 2,
                value: "high".to_owned()
            })
        );
    }

    #[test]
    fn quantum_must_be_positive() {
        assert_eq!(parse_time_quantum("4"), Ok(4));
        assert_eq!(
            parse_time_quantum("0"),
            Err(ScheduleError::InvalidQuantum("0".to_owned()))
        );
    }

    #[test]
    fn burst_list_reports_the_offending_pid() {
        assert_eq!(parse_burst_list("24, 3,3"), Ok(vec![24, 3, 3]));
        assert_eq!(
            parse_burst_list("5,x,3"),
            Err(ScheduleError::InvalidBurstTime {
                pid: 1,
                value: "x".to_owned()
            })
        );
        assert!(matches!(
            parse_burst_list(""),
            Err(ScheduleError::InvalidProcessCount(_))
        ));
    }

    #[test]
    fn build_processes_numbers_from_zero() {
        let processes = build_processes(&[24, 3, 3], None).unwrap();
        assert_eq!(
            processes,
            vec![Process::new(0, 24), Process::new(1, 3), Process::new(2, 3)]
        );

        let processes = build_processes(&[4, 5], Some(&[2, -1][..])).unwrap();
        assert_eq!(processes[1], Process::with_priority(1, 5, -1));
    }

    #[test]
    fn build_processes_rejects_mismatched_priorities() {
        assert!(matches!(
            build_processes(&[4, 5, 6], Some(&[1, 2][..])),
            Err(ScheduleError::InvalidPriority { pid: 2, .. })
        ));
        assert!(matches!(
            build_processes(&[], None),
            Err(ScheduleError::InvalidProcessCount(_))
        ));
    }

    #[test]
    fn prompter_reasks_after_bad_answers() {
        let input = "zero\n0\n2\nfcfs\n10\n-1\n4\n";
        let mut output = Vec::new();
        let mut prompter = Prompter::new(Cursor::new(input), &mut output);

        assert_eq!(prompter.read_process_count().unwrap(), 2);
        assert_eq!(prompter.read_discipline().unwrap(), Discipline::Fcfs);
        let processes = prompter.read_processes(2, Discipline::Fcfs).unwrap();
        assert_eq!(processes, vec![Process::new(0, 10), Process::new(1, 4)]);

        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("invalid process count `zero`"));
        assert!(transcript.contains("invalid burst time `-1` for process 1"));
    }

    #[test]
    fn prompter_asks_priorities_only_for_priority_scheduling() {
        let input = "7\n3\n2\n-1\n";
        let mut output = Vec::new();
        let mut prompter = Prompter::new(Cursor::new(input), &mut output);

        let processes = prompter.read_processes(2, Discipline::Priority).unwrap();
        assert_eq!(
            processes,
            vec![
                Process::with_priority(0, 7, 3),
                Process::with_priority(1, 2, -1)
            ]
        );
        assert!(String::from_utf8(output)
            .unwrap()
            .contains("Priority for process 1: "));
    }

    #[test]
    fn prompter_reads_priorities_for_known_bursts() {
        let mut output = Vec::new();
        let mut prompter = Prompter::new(Cursor::new("4\nlow\n-2\n"), &mut output);

        assert_eq!(prompter.read_priorities(2).unwrap(), vec![4, -2]);
        assert!(String::from_utf8(output)
            .unwrap()
            .contains("invalid priority `low` for process 1"));
    }

    #[test]
    fn prompter_quantum_defaults_on_blank_line() {
        let mut prompter = Prompter::new(Cursor::new("\n"), Vec::new());
        assert_eq!(prompter.read_time_quantum(2).unwrap(), 2);

        let mut prompter = Prompter::new(Cursor::new("0\n5\n"), Vec::new());
        assert_eq!(prompter.read_time_quantum(2).unwrap(), 5);
    }

    #[test]
    fn prompter_fails_on_early_end_of_input() {
        let mut prompter = Prompter::new(Cursor::new("3\n"), Vec::new());
        assert_eq!(prompter.read_process_count().unwrap(), 3);
        let err = prompter.read_processes(3, Discipline::ShortestJobFirst).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
