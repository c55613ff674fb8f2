use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use station_watch::{
    Clock, ClockTime, Endpoints, HourFill, HourSlot, MinuteOfDay, Roster, StationStatus,
    SystemClock, ZeroLength, logging,
};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tabled::Tabled;
use tabled::settings::Style;
use tracing::info;

#[derive(Parser)]
struct Args {
    /// Path to the JSON scenario file (stations and shifts)
    #[arg(short, long, value_name = "FILE", default_value = "data/default.json")]
    scenario: PathBuf,

    /// Whether the end minute of a shift is still on watch
    #[arg(long, value_enum)]
    endpoints: Option<Endpoints>,

    /// How shifts with identical start and end are read
    #[arg(long, value_enum)]
    zero_length: Option<ZeroLength>,

    /// Show the early-morning tail of overnight shifts in the grid
    #[arg(long, value_name = "BOOL")]
    carry_over: Option<bool>,

    /// Evaluate "now" at a fixed UTC offset in minutes instead of local time
    #[arg(long, value_name = "MINUTES", allow_hyphen_values = true)]
    utc_offset: Option<i32>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log: String,
}

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct CompleteHelper {
    pub commands: Vec<String>,
}

impl Completer for CompleteHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        _pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: format!("{} ", cmd),
            })
            .collect();

        Ok((0, candidates))
    }
}

#[derive(Tabled)]
struct StationRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Station")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Commander")]
    commander: String,
    #[tabled(rename = "Phone")]
    phone: String,
}

#[derive(Tabled)]
struct ShiftRow {
    #[tabled(rename = "Shift")]
    window: String,
    #[tabled(rename = "Commander")]
    commander: String,
    #[tabled(rename = "Crew")]
    crew: String,
    #[tabled(rename = "Phone")]
    phone: String,
}

fn or_dash(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

fn paginate(content: String) {
    let pager = Command::new("less")
        .arg("-R")
        .stdin(Stdio::piped())
        .spawn()
        // Fallback to 'more' if 'less' isn't available
        .or_else(|_| Command::new("more").stdin(Stdio::piped()).spawn());

    let Ok(mut pager) = pager else {
        println!("{}", content);
        return;
    };

    if let Some(mut stdin) = pager.stdin.take() {
        if let Err(e) = stdin.write_all(content.as_bytes()) {
            // Broken pipe is common if the user quits the pager early
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                eprintln!("Error writing to pager: {}", e);
            }
        }
    }

    let _ = pager.wait();
}

fn show(content: String, lines: usize) {
    if lines > 20 {
        paginate(content);
    } else {
        println!("{}", content);
    }
}

/// Explicit `HH:MM` argument, otherwise the clock.
fn query_time(arg: Option<&&str>, clock: &dyn Clock) -> Option<MinuteOfDay> {
    match arg {
        Some(text) => match text.parse::<ClockTime>() {
            Ok(t) => Some(MinuteOfDay::from(t)),
            Err(e) => {
                println!("{}", e);
                None
            }
        },
        None => Some(clock.now()),
    }
}

fn cell(fill: &HourFill) -> String {
    if !fill.is_active {
        " · ".dimmed().to_string()
    } else if fill.fill_ratio >= 1.0 {
        "███".green().to_string()
    } else {
        format!("{:>2}%", (fill.fill_ratio * 100.0).round() as u32)
            .black()
            .on_yellow()
            .to_string()
    }
}

fn render_grid(roster: &Roster) -> String {
    let width = roster
        .stations
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(7);
    let mut out = format!("{:width$} ", "Station", width = width);
    for slot in HourSlot::all() {
        out.push_str(&format!(" {:02}", slot.index()));
    }
    out.push('\n');
    for row in roster.grid() {
        out.push_str(&format!("{:width$} ", row.name, width = width));
        for fill in &row.cells {
            out.push_str(&cell(fill));
        }
        out.push('\n');
    }
    out
}

fn list_stations(roster: &Roster, now: MinuteOfDay) {
    let rows: Vec<StationRow> = roster
        .stations
        .iter()
        .filter_map(|station| roster.status(&station.id, now).map(|report| (station, report)))
        .map(|(station, report)| {
            let status = match &report.status {
                StationStatus::Active => "ACTIVE".green().to_string(),
                StationStatus::Inactive => "INACTIVE".red().to_string(),
                StationStatus::Reported(s) => s.yellow().to_string(),
            };
            let shift = report.active_shift.as_ref();
            StationRow {
                id: station.id.to_string(),
                name: station.name.clone(),
                status,
                source: format!("{:?}", report.source).to_lowercase(),
                commander: shift.map(|s| or_dash(&s.commander)).unwrap_or_else(|| "-".to_string()),
                phone: shift.map(|s| or_dash(&s.phone)).unwrap_or_else(|| "-".to_string()),
            }
        })
        .collect();

    if rows.is_empty() {
        println!("No stations loaded.");
        return;
    }
    let len = rows.len();
    let mut table = tabled::Table::new(rows);
    table.with(Style::rounded());
    table.with(tabled::settings::Alignment::left());
    println!("Watch state at {}", now);
    show(table.to_string(), len);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init(&args.log);

    let mut roster = Roster::load_from_file(&args.scenario)?;
    roster.policy = roster
        .policy
        .with_overrides(args.endpoints, args.zero_length, args.carry_over);
    let clock = match args.utc_offset {
        Some(minutes) => SystemClock::with_offset_minutes(minutes)
            .ok_or_else(|| format!("UTC offset out of range: {} minutes", minutes))?,
        None => SystemClock::local(),
    };

    info!(
        scenario = %args.scenario.display(),
        stations = roster.stations.len(),
        policy = ?roster.policy,
        "scenario loaded"
    );
    println!(
        "Watch desk online. Loaded {} stations from {}",
        roster.stations.len(),
        args.scenario.display()
    );
    let unreadable = roster.malformed_shifts().len();
    if unreadable > 0 {
        println!("{} shifts have unreadable times and will be skipped (see 'errors').", unreadable);
    }

    let config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let helper = CompleteHelper {
        commands: ["ls", "stats", "status", "grid", "hour", "errors", "help", "exit"]
            .iter()
            .map(|c| c.to_string())
            .collect(),
    };

    let mut rl = Editor::with_config(config)?;
    rl.set_helper(Some(helper));

    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                rl.add_history_entry(trimmed)?;

                let parts: Vec<&str> = trimmed.split_whitespace().collect();
                match parts[0] {
                    "ls" => {
                        if let Some(now) = query_time(parts.get(1), &clock) {
                            list_stations(&roster, now);
                        }
                    }
                    "stats" => {
                        if let Some(now) = query_time(parts.get(1), &clock) {
                            let stats = roster.stats(now);
                            println!(
                                "{}: {} stations, {} on watch, {} off watch",
                                now,
                                stats.total_stations,
                                stats.active_stations.to_string().green(),
                                stats.inactive_stations.to_string().red()
                            );
                        }
                    }
                    "status" => {
                        let Some(id) = parts.get(1) else {
                            println!("Usage: status <station_id> [HH:MM]");
                            continue;
                        };
                        let Some(now) = query_time(parts.get(2), &clock) else {
                            continue;
                        };
                        match roster.status(id, now) {
                            Some(report) => println!("{}", serde_json::to_string_pretty(&report)?),
                            None => println!("Unknown station: {}", id),
                        }
                    }
                    "grid" => {
                        let content = render_grid(&roster);
                        show(content, roster.stations.len());
                    }
                    "hour" => {
                        let (Some(id), Some(h)) = (parts.get(1), parts.get(2)) else {
                            println!("Usage: hour <station_id> <0-23>");
                            continue;
                        };
                        let Some(station) = roster.station(id) else {
                            println!("Unknown station: {}", id);
                            continue;
                        };
                        let slot = match h.parse::<i64>().map_err(|e| e.to_string()).and_then(|h| {
                            HourSlot::new(h).map_err(|e| e.to_string())
                        }) {
                            Ok(slot) => slot,
                            Err(e) => {
                                println!("{}", e);
                                continue;
                            }
                        };
                        let fill = roster.fill_at_hour(&station.id, slot);
                        println!(
                            "{} at {}: {}% on watch",
                            station,
                            slot,
                            (fill.fill_ratio * 100.0).round()
                        );
                        let rows: Vec<ShiftRow> = roster
                            .shifts_at_hour(&station.id, slot)
                            .into_iter()
                            .map(|s| ShiftRow {
                                window: s.to_string(),
                                commander: or_dash(&s.commander),
                                crew: or_dash(&s.crew),
                                phone: or_dash(&s.phone),
                            })
                            .collect();
                        if !rows.is_empty() {
                            let mut table = tabled::Table::new(rows);
                            table.with(Style::rounded());
                            println!("{}", table);
                        }
                    }
                    "errors" => {
                        let malformed = roster.malformed_shifts();
                        if malformed.is_empty() {
                            println!("All shifts readable.");
                        }
                        for (shift, error) in malformed {
                            println!("{} {}: {}", shift.station_id, shift, error);
                        }
                    }
                    "help" | "?" => {
                        println!("\nAvailable Commands:");
                        println!("  ls [HH:MM]            - List stations and their watch status");
                        println!("  stats [HH:MM]         - Count stations on and off watch");
                        println!("  status <id> [HH:MM]   - Status report of station <id>");
                        println!("  grid                  - Show today's 24h duty grid");
                        println!("  hour <id> <h>         - Fill and crews of <id> in hour <h>");
                        println!("  errors                - List shifts with unreadable times");
                        println!("  help / ?              - Show this help menu");
                        println!("  exit / quit           - Exit the console\n");
                    }
                    "exit" | "quit" => break,
                    _ => println!("Unknown command: {}", parts[0]),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}
