//! Line-oriented command console.
//!
//! Commands start with a command word; free-text names take the remainder
//! of the command line or a line of their own, and multi-line payloads end
//! at a blank line. Times are "HH:MM" and a stop entry is a station name
//! with the time as its last token. The console is generic over its input
//! and output streams, so whole sessions are testable as transcripts.
//!
//! Command summary:
//!
//! ```text
//! insert-line <name>          (station per line, blank line ends)
//! remove-line <name>
//! consult-line <name>
//! consult-station <name>
//! insert-schedule <line>      (train on next line, then "<station> HH:MM"
//!                              per line, blank line ends)
//! remove-schedule <line>      ("<station> HH:MM" on next line)
//! consult-schedules <line>    (station on next line)
//! station-trains <station>
//! best-schedule <line>        (departure, destination, "HH:MM" lines)
//! quit
//! ```

use std::io::{self, BufRead, Write};
use tracing::debug;

use crate::domain::{ClockTime, NetworkError, TrainId};
use crate::network::{Network, ScheduleView};

const LINE_INSERTED: &str = "Line inserted.";
const LINE_REMOVED: &str = "Line removed.";
const SCHEDULE_INSERTED: &str = "Schedule inserted.";
const SCHEDULE_REMOVED: &str = "Schedule removed.";
const BYE: &str = "Bye.";

const EXISTING_LINE: &str = "Line already exists.";
const NONEXISTENT_LINE: &str = "Nonexistent line.";
const NONEXISTENT_STATION: &str = "Nonexistent station.";
const NONEXISTENT_DEPARTURE: &str = "Nonexistent departure station.";
const NONEXISTENT_SCHEDULE: &str = "Nonexistent schedule.";
const INVALID_SCHEDULE: &str = "Invalid schedule.";
const IMPOSSIBLE_ROUTE: &str = "Impossible route.";
const INVALID_TIME: &str = "Invalid time.";

/// Run a console session against `network`, reading commands from `input`
/// and writing results to `out`. Returns when `quit` is read or the input
/// ends.
pub fn run<R: BufRead, W: Write>(
    network: &mut Network,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    Console {
        network,
        lines: input.lines(),
        out,
    }
    .run()
}

struct Console<'a, R: BufRead, W: Write> {
    network: &'a mut Network,
    lines: io::Lines<R>,
    out: &'a mut W,
}

impl<R: BufRead, W: Write> Console<'_, R, W> {
    fn run(&mut self) -> io::Result<()> {
        while let Some(line) = self.next_line()? {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let (command, rest) = match trimmed.split_once(char::is_whitespace) {
                Some((command, rest)) => (command, rest.trim()),
                None => (trimmed, ""),
            };
            match command.to_lowercase().as_str() {
                "insert-line" => self.insert_line(rest)?,
                "remove-line" => self.remove_line(rest)?,
                "consult-line" => self.consult_line(rest)?,
                "consult-station" => self.consult_station(rest)?,
                "insert-schedule" => self.insert_schedule(rest)?,
                "remove-schedule" => self.remove_schedule(rest)?,
                "consult-schedules" => self.consult_schedules(rest)?,
                "station-trains" => self.station_trains(rest)?,
                "best-schedule" => self.best_schedule(rest)?,
                "quit" => {
                    writeln!(self.out, "{BYE}")?;
                    break;
                }
                other => {
                    debug!(command = other, "unknown command");
                    writeln!(self.out, "Unknown command: {other}")?;
                }
            }
        }
        Ok(())
    }

    fn insert_line(&mut self, name: &str) -> io::Result<()> {
        let stations = self.read_block()?;
        match self.network.insert_line(name, &stations) {
            Ok(()) => writeln!(self.out, "{LINE_INSERTED}"),
            Err(NetworkError::LineExists(_)) => writeln!(self.out, "{EXISTING_LINE}"),
            Err(err) => self.unexpected(err),
        }
    }

    fn remove_line(&mut self, name: &str) -> io::Result<()> {
        match self.network.remove_line(name) {
            Ok(()) => writeln!(self.out, "{LINE_REMOVED}"),
            Err(NetworkError::UnknownLine(_)) => writeln!(self.out, "{NONEXISTENT_LINE}"),
            Err(err) => self.unexpected(err),
        }
    }

    fn consult_line(&mut self, name: &str) -> io::Result<()> {
        match self.network.consult_line(name) {
            Ok(stations) => {
                let stations: Vec<String> =
                    stations.into_iter().map(str::to_string).collect();
                for station in stations {
                    writeln!(self.out, "{station}")?;
                }
                Ok(())
            }
            Err(NetworkError::UnknownLine(_)) => writeln!(self.out, "{NONEXISTENT_LINE}"),
            Err(err) => self.unexpected(err),
        }
    }

    fn consult_station(&mut self, name: &str) -> io::Result<()> {
        match self.network.consult_station(name) {
            Ok(lines) => {
                let lines: Vec<String> = lines.into_iter().map(str::to_string).collect();
                for line in lines {
                    writeln!(self.out, "{line}")?;
                }
                Ok(())
            }
            Err(NetworkError::UnknownStation(_)) => {
                writeln!(self.out, "{NONEXISTENT_STATION}")
            }
            Err(err) => self.unexpected(err),
        }
    }

    fn insert_schedule(&mut self, line_name: &str) -> io::Result<()> {
        let train_line = self.next_line()?.unwrap_or_default();
        // Consume the whole stop block before validating anything, so a
        // rejected command leaves the input stream at the next command
        let block = self.read_block()?;

        let Ok(train) = TrainId::parse(train_line.trim()) else {
            return writeln!(self.out, "{INVALID_SCHEDULE}");
        };
        let mut stops = Vec::with_capacity(block.len());
        for entry in &block {
            let Some(stop) = split_stop(entry) else {
                return writeln!(self.out, "{INVALID_SCHEDULE}");
            };
            stops.push(stop);
        }

        match self.network.insert_schedule(line_name, train, &stops) {
            Ok(()) => writeln!(self.out, "{SCHEDULE_INSERTED}"),
            Err(NetworkError::UnknownLine(_)) => writeln!(self.out, "{NONEXISTENT_LINE}"),
            Err(NetworkError::InvalidSchedule(_)) => {
                writeln!(self.out, "{INVALID_SCHEDULE}")
            }
            Err(err) => self.unexpected(err),
        }
    }

    fn remove_schedule(&mut self, line_name: &str) -> io::Result<()> {
        let departure = self.next_line()?.unwrap_or_default();
        let Some((station, time)) = split_stop(&departure) else {
            return writeln!(self.out, "{INVALID_TIME}");
        };
        match self.network.remove_schedule(line_name, &station, time) {
            Ok(()) => writeln!(self.out, "{SCHEDULE_REMOVED}"),
            Err(NetworkError::UnknownLine(_)) => writeln!(self.out, "{NONEXISTENT_LINE}"),
            Err(NetworkError::UnknownSchedule { .. }) => {
                writeln!(self.out, "{NONEXISTENT_SCHEDULE}")
            }
            Err(err) => self.unexpected(err),
        }
    }

    fn consult_schedules(&mut self, line_name: &str) -> io::Result<()> {
        let station = self.next_line()?.unwrap_or_default();
        match self.network.consult_schedules(line_name, station.trim()) {
            Ok(schedules) => {
                for schedule in &schedules {
                    self.print_schedule(schedule)?;
                }
                Ok(())
            }
            Err(NetworkError::UnknownLine(_)) => writeln!(self.out, "{NONEXISTENT_LINE}"),
            Err(NetworkError::UnknownStation(_)) => {
                writeln!(self.out, "{NONEXISTENT_DEPARTURE}")
            }
            Err(err) => self.unexpected(err),
        }
    }

    fn station_trains(&mut self, name: &str) -> io::Result<()> {
        match self.network.station_trains(name) {
            Ok(passages) => {
                for passage in &passages {
                    writeln!(self.out, "Train {} {}", passage.train, passage.time)?;
                }
                Ok(())
            }
            Err(NetworkError::UnknownStation(_)) => {
                writeln!(self.out, "{NONEXISTENT_STATION}")
            }
            Err(err) => self.unexpected(err),
        }
    }

    fn best_schedule(&mut self, line_name: &str) -> io::Result<()> {
        let departure = self.next_line()?.unwrap_or_default();
        let destination = self.next_line()?.unwrap_or_default();
        let deadline_line = self.next_line()?.unwrap_or_default();

        let Ok(deadline) = ClockTime::parse_hhmm(deadline_line.trim()) else {
            return writeln!(self.out, "{INVALID_TIME}");
        };
        match self.network.best_schedule(
            line_name,
            departure.trim(),
            destination.trim(),
            deadline,
        ) {
            Ok(schedule) => self.print_schedule(&schedule),
            Err(NetworkError::UnknownLine(_)) => writeln!(self.out, "{NONEXISTENT_LINE}"),
            Err(NetworkError::UnknownStation(_)) => {
                writeln!(self.out, "{NONEXISTENT_DEPARTURE}")
            }
            Err(NetworkError::ImpossibleRoute) => writeln!(self.out, "{IMPOSSIBLE_ROUTE}"),
            Err(err) => self.unexpected(err),
        }
    }

    fn print_schedule(&mut self, schedule: &ScheduleView) -> io::Result<()> {
        writeln!(self.out, "{}", schedule.train)?;
        for (station, time) in &schedule.stops {
            writeln!(self.out, "{station} {time}")?;
        }
        Ok(())
    }

    /// Errors a command cannot produce given its own checks.
    fn unexpected(&mut self, err: NetworkError) -> io::Result<()> {
        debug!(error = %err, "unexpected network error");
        writeln!(self.out, "{err}")
    }

    fn next_line(&mut self) -> io::Result<Option<String>> {
        self.lines.next().transpose()
    }

    /// Read trimmed non-blank lines up to a blank line or end of input.
    fn read_block(&mut self) -> io::Result<Vec<String>> {
        let mut block = Vec::new();
        while let Some(line) = self.next_line()? {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                break;
            }
            block.push(trimmed.to_string());
        }
        Ok(block)
    }
}

/// Split a stop entry into its station name and trailing "HH:MM" token.
fn split_stop(entry: &str) -> Option<(String, ClockTime)> {
    let (name, time_token) = entry.trim().rsplit_once(char::is_whitespace)?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let time = ClockTime::parse_hhmm(time_token).ok()?;
    Some((name.to_string(), time))
}
