//! Command-line front end.
//!
//! Usage: sched-sim [OPTIONS]
//! Missing values are asked for on stdin.

use crate::{
    config::{Config, ConfigError},
    input::{self, Prompter},
    output::{OutputFormat, OutputFormatter},
    scheduler::{self, Discipline, Priority, Process, ScheduleError, ScheduleRunner, Ticks},
};
use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use log::{debug, info};
use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("missing value for {0}")]
    MissingValue(String),

    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("invalid argument: {0}")]
    InvalidArg(String),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Run(RunOptions),
    Help,
    Version,
}

/// Flags given on the command line. Anything left unset falls back to the config.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub algorithm: Option<Discipline>,
    pub bursts: Option<Vec<Ticks>>,
    pub priorities: Option<Vec<Priority>>,
    pub time_quantum: Option<Ticks>,
    pub output: Option<OutputFormat>,
    pub config: Option<PathBuf>,
    pub tui: bool,
}

/// Parses everything after the program name.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> CliResult<Command> {
    let mut options = RunOptions::default();
    let mut args = args.iter().map(AsRef::<str>::as_ref);

    while let Some(arg) = args.next() {
        let mut value = || {
            args.next()
                .ok_or_else(|| CliError::MissingValue(arg.to_owned()))
        };

        match arg {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "-a" | "--algorithm" => options.algorithm = Some(value()?.parse()?),
            "-b" | "--bursts" => options.bursts = Some(input::parse_burst_list(value()?)?),
            "-p" | "--priorities" => {
                options.priorities = Some(input::parse_priority_list(value()?)?)
            }
            "-q" | "--quantum" => {
                options.time_quantum = Some(input::parse_time_quantum(value()?)?)
            }
            "-o" | "--output" => {
                options.output = Some(value()?.parse().map_err(CliError::InvalidArg)?)
            }
            "-c" | "--config" => options.config = Some(PathBuf::from(value()?)),
            "-t" | "--tui" => options.tui = true,
            _ => return Err(CliError::UnknownOption(arg.to_owned())),
        }
    }

    Ok(Command::Run(options))
}

pub fn usage() -> String {
    format!(
        "sched-sim {}
Simulate FCFS, SJF, Priority and Round-Robin CPU scheduling over a batch of processes.

Usage: sched-sim [OPTIONS]

Options:
  -a, --algorithm <NAME>    fcfs, sjf, priority or rr
  -b, --bursts <LIST>       comma separated burst times, e.g. 24,3,3
  -p, --priorities <LIST>   comma separated priorities, lower runs first
  -q, --quantum <TICKS>     Round-Robin time quantum (default {})
  -o, --output <FORMAT>     table, plain or json
  -c, --config <PATH>       TOML config file (or ${})
  -t, --tui                 browse results in an interactive terminal view
  -h, --help                print this help
  -V, --version             print the version

Values not given as options are asked for interactively.",
        env!("CARGO_PKG_VERSION"),
        scheduler::DEFAULT_TIME_QUANTUM,
        crate::config::CONFIG_ENV,
    )
}

/// Everything needed for one simulation, after merging flags, config and prompts.
#[derive(Debug, PartialEq, Eq)]
pub struct Simulation {
    pub discipline: Discipline,
    pub processes: Vec<Process>,
    pub time_quantum: Ticks,
    pub output: OutputFormat,
    pub tui: bool,
}

impl Simulation {
    /// Fills whatever `options` and `config` leave open by asking through `prompter`.
    pub fn gather<R: BufRead, W: Write>(
        options: RunOptions,
        config: Config,
        prompter: &mut Prompter<R, W>,
    ) -> CliResult<Self> {
        let output = options.output.unwrap_or(config.output);
        let tui = options.tui || config.tui;

        let (discipline, processes, time_quantum) = match options.bursts {
            Some(bursts) => {
                let discipline = match options.algorithm.or(config.algorithm) {
                    Some(discipline) => discipline,
                    None => prompter.read_discipline()?,
                };
                let priorities = match options.priorities {
                    Some(priorities) => Some(priorities),
                    None if discipline.requires_priority() => {
                        Some(prompter.read_priorities(bursts.len())?)
                    }
                    None => None,
                };
                let processes = input::build_processes(&bursts, priorities.as_deref())?;
                let time_quantum = options.time_quantum.unwrap_or(config.time_quantum);
                (discipline, processes, time_quantum)
            }
            None => {
                // Count first, then the algorithm, then per-process values
                let count = prompter.read_process_count()?;
                let discipline = match options.algorithm.or(config.algorithm) {
                    Some(discipline) => discipline,
                    None => prompter.read_discipline()?,
                };
                let processes = prompter.read_processes(count, discipline)?;
                let time_quantum = match options.time_quantum {
                    Some(quantum) => quantum,
                    None if discipline == Discipline::RoundRobin => {
                        prompter.read_time_quantum(config.time_quantum)?
                    }
                    None => config.time_quantum,
                };
                (discipline, processes, time_quantum)
            }
        };

        Ok(Self {
            discipline,
            processes,
            time_quantum,
            output,
            tui,
        })
    }

    pub fn execute<W: Write>(self, out: &mut W) -> CliResult<()> {
        info!(
            "simulating {} processes with {}",
            self.processes.len(),
            self.discipline
        );

        if self.tui {
            return self.browse();
        }

        let schedule = scheduler::run(
            self.discipline,
            &self.processes,
            Some(self.time_quantum),
        )?;
        let report = schedule.report()?;
        OutputFormatter::new(self.output).write(out, &report)?;
        Ok(())
    }

    fn browse(self) -> CliResult<()> {
        execute!(io::stdout(), Clear(ClearType::All))?;

        let mut runner =
            ScheduleRunner::new(self.processes, self.discipline, Some(self.time_quantum))?;
        while runner.run()? {}
        drop(runner);

        execute!(io::stdout(), Clear(ClearType::All))?;
        Ok(())
    }
}

pub fn run(options: RunOptions) -> CliResult<()> {
    let config = Config::resolve(options.config.as_deref())?;
    debug!("effective config: {:?}", config);

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stderr());
    let simulation = Simulation::gather(options, config, &mut prompter)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    simulation.execute(&mut out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn options(args: &[&str]) -> RunOptions {
        match parse_args(args).unwrap() {
            Command::Run(options) => options,
            other => panic!("expected run options, got {:?}", other),
        }
    }

    #[test]
    fn parses_all_flags() {
        let options = options(&[
            "--algorithm",
            "priority",
            "-b",
            "4,5,6",
            "-p",
            "2,-1,0",
            "-q",
            "3",
            "-o",
            "json",
            "-c",
            "sim.toml",
            "--tui",
        ]);

        assert_eq!(options.algorithm, Some(Discipline::Priority));
        assert_eq!(options.bursts, Some(vec![4, 5, 6]));
        assert_eq!(options.priorities, Some(vec![2, -1, 0]));
        assert_eq!(options.time_quantum, Some(3));
        assert_eq!(options.output, Some(OutputFormat::Json));
        assert_eq!(options.config, Some(PathBuf::from("sim.toml")));
        assert!(options.tui);
    }

    #[test]
    fn help_and_version_short_circuit() {
        assert_eq!(parse_args(&["-q", "2", "--help"]).unwrap(), Command::Help);
        assert_eq!(parse_args(&["-V"]).unwrap(), Command::Version);
        assert!(usage().contains("--quantum"));
    }

    #[test]
    fn flag_errors_stay_distinct() {
        assert!(matches!(
            parse_args(&["-a", "lottery"]),
            Err(CliError::Schedule(ScheduleError::UnknownAlgorithm(_)))
        ));
        assert!(matches!(
            parse_args(&["-q", "0"]),
            Err(CliError::Schedule(ScheduleError::InvalidQuantum(_)))
        ));
        assert!(matches!(
            parse_args(&["-b", "3,0"]),
            Err(CliError::Schedule(ScheduleError::InvalidBurstTime { pid: 1, .. }))
        ));
        assert!(matches!(
            parse_args(&["-p", "1,x"]),
            Err(CliError::Schedule(ScheduleError::InvalidPriority { pid: 1, .. }))
        ));
        assert!(matches!(
            parse_args(&["--bursts"]),
            Err(CliError::MissingValue(flag)) if flag == "--bursts"
        ));
        assert!(matches!(
            parse_args(&["-o", "xml"]),
            Err(CliError::InvalidArg(_))
        ));
        assert!(matches!(
            parse_args(&["--fast"]),
            Err(CliError::UnknownOption(_))
        ));
    }

    #[test]
    fn flags_override_config() {
        let config = Config {
            algorithm: Some(Discipline::Fcfs),
            time_quantum: 5,
            output: OutputFormat::Json,
            tui: false,
        };
        let mut prompter = Prompter::new(Cursor::new(""), Vec::new());
        let simulation = Simulation::gather(
            options(&["-a", "rr", "-b", "5,3", "-o", "plain"]),
            config,
            &mut prompter,
        )
        .unwrap();

        assert_eq!(simulation.discipline, Discipline::RoundRobin);
        assert_eq!(simulation.time_quantum, 5);
        assert_eq!(simulation.output, OutputFormat::Plain);
        assert_eq!(
            simulation.processes,
            vec![Process::new(0, 5), Process::new(1, 3)]
        );
    }

    #[test]
    fn prompts_for_everything_missing() {
        let mut prompter = Prompter::new(Cursor::new("2\npriority\n8\n1\n4\n0\n"), Vec::new());
        let simulation =
            Simulation::gather(RunOptions::default(), Config::default(), &mut prompter).unwrap();

        assert_eq!(simulation.discipline, Discipline::Priority);
        assert_eq!(
            simulation.processes,
            vec![
                Process::with_priority(0, 8, 1),
                Process::with_priority(1, 4, 0)
            ]
        );
        assert_eq!(simulation.time_quantum, 2);
    }

    #[test]
    fn priority_scheduling_asks_for_missing_priorities() {
        let mut output = Vec::new();
        let mut prompter = Prompter::new(Cursor::new("2\n0\n1\n"), &mut output);
        let simulation = Simulation::gather(
            options(&["-a", "priority", "-b", "5,1,3"]),
            Config::default(),
            &mut prompter,
        )
        .unwrap();

        assert_eq!(
            simulation.processes,
            vec![
                Process::with_priority(0, 5, 2),
                Process::with_priority(1, 1, 0),
                Process::with_priority(2, 3, 1)
            ]
        );
        assert!(String::from_utf8(output)
            .unwrap()
            .contains("Priority for process 2: "));

        let mut prompter = Prompter::new(Cursor::new(""), Vec::new());
        assert!(matches!(
            Simulation::gather(
                options(&["-a", "priority", "-b", "5,1,3"]),
                Config::default(),
                &mut prompter,
            ),
            Err(CliError::Io(err)) if err.kind() == io::ErrorKind::UnexpectedEof
        ));
    }

    #[test]
    fn round_robin_session_asks_for_the_quantum() {
        let config = Config {
            time_quantum: 3,
            ..Config::default()
        };
        let mut prompter = Prompter::new(Cursor::new("2\nrr\n5\n4\n\n"), Vec::new());
        let simulation =
            Simulation::gather(RunOptions::default(), config.clone(), &mut prompter).unwrap();
        assert_eq!(simulation.discipline, Discipline::RoundRobin);
        assert_eq!(simulation.time_quantum, 3);

        let mut prompter = Prompter::new(Cursor::new("1\nrr\n5\n4\n"), Vec::new());
        let simulation =
            Simulation::gather(RunOptions::default(), config.clone(), &mut prompter).unwrap();
        assert_eq!(simulation.time_quantum, 4);

        // An explicit quantum is never asked for
        let mut prompter = Prompter::new(Cursor::new("1\nrr\n5\n"), Vec::new());
        let simulation =
            Simulation::gather(options(&["-q", "6"]), config, &mut prompter).unwrap();
        assert_eq!(simulation.time_quantum, 6);
    }

    #[test]
    fn execute_writes_the_report() {
        let mut prompter = Prompter::new(Cursor::new(""), Vec::new());
        let simulation = Simulation::gather(
            options(&["-a", "fcfs", "-b", "24,3,3", "-o", "plain"]),
            Config::default(),
            &mut prompter,
        )
        .unwrap();

        let mut out = Vec::new();
        simulation.execute(&mut out).unwrap();
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("Average Waiting Time: 17.00"));
    }
}
