//! Report rendering for non-interactive runs.

use crate::scheduler::{Process, ScheduleReport};
use serde::{Deserialize, Serialize};
use std::{
    io::{self, Write},
    str::FromStr,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Table,
    Plain,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "plain" | "text" => Ok(OutputFormat::Plain),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn write<W: Write>(&self, out: &mut W, report: &ScheduleReport) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(report)
                    .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
                writeln!(out, "{}", json)
            }
            OutputFormat::Table => write_table(out, report),
            OutputFormat::Plain => write_averages(out, report),
        }
    }
}

fn write_table<W: Write>(out: &mut W, report: &ScheduleReport) -> io::Result<()> {
    match report.time_quantum {
        Some(quantum) => writeln!(out, "{} (time quantum {})", report.discipline, quantum)?,
        None => writeln!(out, "{}", report.discipline)?,
    }
    writeln!(out)?;
    write_rows(out, &report.processes)?;

    // Only Round-Robin emits more than one record per process
    if report.completions.len() != report.processes.len() {
        writeln!(out)?;
        writeln!(out, "Completions")?;
        write_rows(out, &report.completions)?;
    }

    writeln!(out)?;
    write_averages(out, report)
}

fn write_rows<W: Write>(out: &mut W, processes: &[Process]) -> io::Result<()> {
    writeln!(
        out,
        "{:>5}  {:>6}  {:>8}  {:>8}  {:>10}",
        "PID", "Burst", "Priority", "Waiting", "Turnaround"
    )?;
    for process in processes {
        writeln!(
            out,
            "{:>5}  {:>6}  {:>8}  {:>8}  {:>10}",
            process.pid(),
            process.burst_time(),
            process.priority(),
            process.waiting_time(),
            process.turnaround_time()
        )?;
    }
    Ok(())
}

fn write_averages<W: Write>(out: &mut W, report: &ScheduleReport) -> io::Result<()> {
    writeln!(out, "Results for {}:", report.discipline)?;
    writeln!(out, "Average Waiting Time: {:.2}", report.average_waiting_time)?;
    writeln!(
        out,
        "Average Turnaround Time: {:.2}",
        report.average_turnaround_time
    )
}
