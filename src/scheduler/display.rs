use super::{runner::RunnerEvent, Discipline, Process, ScheduleReport, ScheduleResult};
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use log::warn;
use std::{
    io::{self, Stdout},
    sync::mpsc::{self, Receiver},
    thread,
    time::{Duration, Instant},
};
use tui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table},
    Terminal,
};

pub enum DisplayEvent {
    Input(KeyEvent),
    Tick,
}

const TICK_RATE: Duration = Duration::from_millis(200);

pub struct DisplayTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    input_rx: Receiver<DisplayEvent>,
}

impl DisplayTerminal {
    pub fn new() -> Result<Self, io::Error> {
        crossterm::terminal::enable_raw_mode()?;

        // Set up the input handling thread
        let (input_tx, input_rx) = mpsc::channel();
        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = TICK_RATE
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                match event::poll(timeout) {
                    Ok(true) => match event::read() {
                        Ok(Event::Key(key)) => {
                            if input_tx.send(DisplayEvent::Input(key)).is_err() {
                                break;
                            }
                        }
                        Ok(_) => {}
                        Err(err) => {
                            warn!("failed to read terminal event: {}", err);
                            break;
                        }
                    },
                    Ok(false) => {}
                    Err(err) => {
                        warn!("failed to poll terminal events: {}", err);
                        break;
                    }
                }

                if last_tick.elapsed() >= TICK_RATE {
                    if input_tx.send(DisplayEvent::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        // Set up the terminal-user-interface
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal, input_rx })
    }

    pub fn draw(
        &mut self,
        discipline: Discipline,
        outcome: Option<&ScheduleResult<ScheduleReport>>,
    ) -> Result<(), io::Error> {
        let (summary, summary_color) = match outcome {
            None => (format!("{} | Scheduling...", discipline), Color::Yellow),
            Some(Ok(report)) => (summary_line(report), Color::LightBlue),
            Some(Err(err)) => (format!("{} | {}", discipline, err), Color::LightRed),
        };
        let records: &[Process] = match outcome {
            Some(Ok(report)) => report.processes.as_slice(),
            _ => &[],
        };

        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints([Constraint::Length(3), Constraint::Min(5)])
                .split(f.size());

            let summary = Paragraph::new(summary)
                .style(
                    Style::default()
                        .add_modifier(Modifier::BOLD)
                        .fg(summary_color),
                )
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title("Results")
                        .border_type(BorderType::Rounded),
                );

            f.render_widget(summary, chunks[0]);

            let items = records.iter().map(|process| {
                Row::new(vec![
                    Cell::from(process.pid().to_string())
                        .style(Style::default().add_modifier(Modifier::BOLD)),
                    Cell::from("|"),
                    Cell::from(process.burst_time().to_string()),
                    Cell::from("|"),
                    Cell::from(process.priority().to_string()),
                    Cell::from("|"),
                    Cell::from(process.waiting_time().to_string()),
                    Cell::from("|"),
                    Cell::from(process.turnaround_time().to_string()),
                ])
            });

            let table = Table::new(items)
                .header(
                    Row::new(vec![
                        "PID",
                        "|",
                        "Burst",
                        "|",
                        "Priority",
                        "|",
                        "Waiting",
                        "|",
                        "Turnaround",
                    ])
                    .style(Style::default().add_modifier(Modifier::BOLD)),
                )
                .widths(&[
                    Constraint::Length(3),
                    Constraint::Length(1),
                    Constraint::Length(6),
                    Constraint::Length(1),
                    Constraint::Length(8),
                    Constraint::Length(1),
                    Constraint::Length(8),
                    Constraint::Length(1),
                    Constraint::Length(10),
                ])
                .block(
                    Block::default()
                        .title(format!("{} (n: next, p: previous, q: quit)", discipline))
                        .borders(Borders::ALL),
                )
                .style(Style::default().fg(Color::LightGreen))
                .column_spacing(1);

            f.render_widget(table, chunks[1]);
        })?;

        Ok(())
    }

    pub fn get_input(&self) -> RunnerEvent {
        // Get the user's input and return a matching event
        let event = match self.input_rx.recv() {
            Ok(event) => event,
            Err(_) => return RunnerEvent::Quit,
        };

        if let DisplayEvent::Input(key) = event {
            if key.modifiers.is_empty() {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return RunnerEvent::Quit,
                    KeyCode::Char('n') | KeyCode::Right | KeyCode::Tab => {
                        return RunnerEvent::Next
                    }
                    KeyCode::Char('p') | KeyCode::Left => return RunnerEvent::Previous,
                    _ => {}
                };
            }
        }
        RunnerEvent::None
    }
}

impl Drop for DisplayTerminal {
    fn drop(&mut self) {
        if let Err(err) = crossterm::terminal::disable_raw_mode() {
            warn!("failed to restore terminal mode: {}", err);
        }
    }
}

fn summary_line(report: &ScheduleReport) -> String {
    let quantum = match report.time_quantum {
        Some(quantum) => format!(" | Quantum: {}", quantum),
        None => String::new(),
    };
    format!(
        "{}{} | Average waiting: {:.2} | Average turnaround: {:.2}",
        report.discipline, quantum, report.average_waiting_time, report.average_turnaround_time
    )
}
