use std::{
    io,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local, Utc};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use itertools::Itertools;
use serde::Serialize;

use crate::{
    constants::{APP_NAME, STORAGE_SETTINGS, WEEKDAY_HEADERS},
    date_math::{DayKey, YearMonth},
    domain::{HabitRecord, Status},
    error::{HabitError, Result},
    month_view::{Cell, MonthGrid, MonthStats},
    storage::{self, HabitStore},
    tracker::HabitTracker,
};

#[derive(Parser, Debug)]
#[command(name = "habits")]
#[command(about = "Habit calendar for the terminal", long_about = None)]
pub struct Cli {
    #[arg(long, global = true, help = "Directory holding habits.json")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(about = "Advance a day's status (none -> done -> missed -> none)")]
    Toggle {
        #[arg(help = "Day as YYYY-MM-DD")]
        date: String,
    },

    #[command(about = "Print a month calendar with its counts")]
    Show {
        #[arg(long, help = "Month as YYYY-MM, defaults to the current month")]
        month: Option<String>,
    },

    #[command(about = "Export the habit record")]
    Export {
        #[arg(long, value_enum, help = "Export format")]
        format: ExportFormat,

        #[arg(long, short, help = "Output path")]
        out: Option<PathBuf>,
    },

    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(help = "Shell type (bash, zsh, fish)")]
        shell: String,
    },
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
}

#[derive(Debug, Serialize)]
struct HabitExport<'a> {
    schema_version: u32,
    exported_at: DateTime<Utc>,
    days: &'a HabitRecord,
}

#[derive(Debug, Serialize)]
struct CsvRow {
    date: String,
    status: &'static str,
}

fn open_store(data_dir: Option<&Path>) -> HabitStore {
    HabitStore::in_dir(&storage::get_data_dir(data_dir))
}

pub fn toggle(data_dir: Option<&Path>, date: &str) -> Result<Status> {
    let key: DayKey = date.parse()?;
    let store = open_store(data_dir);

    let record = store.load().toggled(key);
    store.save(&record)?;

    let status = record.status(&key);
    println!("{} is now {}", key, status.token());
    Ok(status)
}

pub fn show(data_dir: Option<&Path>, month: Option<&str>) -> Result<()> {
    let today = Local::now().date_naive();
    let month = match month {
        Some(raw) => raw.parse()?,
        None => YearMonth::from_date(today),
    };

    let mut tracker = HabitTracker::open(open_store(data_dir), today);
    tracker.jump_to(month);

    print!(
        "{}",
        render_month_text(&tracker.grid(today), &tracker.stats())
    );
    Ok(())
}

fn cell_text(cell: &Cell) -> String {
    match cell {
        Cell::Pad => "    ".to_string(),
        Cell::Day(day) => {
            let marker = match day.status {
                Status::Done => '+',
                Status::Missed => '-',
                Status::None if day.is_today => '*',
                Status::None => ' ',
            };
            format!("{:>3}{}", day.day, marker)
        }
    }
}

pub fn render_month_text(grid: &MonthGrid, stats: &MonthStats) -> String {
    let mut out = String::new();
    out.push_str(format!("{:^28}", grid.month.label()).trim_end());
    out.push('\n');
    out.push_str(
        WEEKDAY_HEADERS
            .iter()
            .map(|header| format!("{:>3} ", header))
            .join("")
            .trim_end(),
    );
    out.push('\n');

    for row in grid.rows() {
        out.push_str(row.iter().map(cell_text).join("").trim_end());
        out.push('\n');
    }

    out.push_str(&format!(
        "\nDone: {}  Missed: {}  Unmarked: {}\n",
        stats.done_count,
        stats.missed_count,
        stats.unmarked(grid.month.days())
    ));
    out
}

pub fn export_json(record: &HabitRecord, exported_at: DateTime<Utc>) -> Result<String> {
    let export = HabitExport {
        schema_version: STORAGE_SETTINGS.export_schema_version,
        exported_at,
        days: record,
    };
    Ok(serde_json::to_string_pretty(&export)?)
}

pub fn export_csv(record: &HabitRecord) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for (key, status) in record.iter() {
        writer.serialize(CsvRow {
            date: key.to_string(),
            status: status.token(),
        })?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| HabitError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn export_data(
    data_dir: Option<&Path>,
    format: ExportFormat,
    out_path: Option<PathBuf>,
) -> Result<()> {
    let tracker = HabitTracker::open(open_store(data_dir), Local::now().date_naive());

    let content = match format {
        ExportFormat::Json => export_json(tracker.record(), Utc::now())?,
        ExportFormat::Csv => export_csv(tracker.record())?,
    };

    if let Some(path) = out_path {
        storage::write_text_file(&path, &content)?;
        println!("Exported to {}", path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

pub fn print_completions(shell: &str) -> Result<()> {
    use clap_complete::Shell;
    let shell = match shell {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        _ => return Err(HabitError::UnsupportedShell(shell.to_string())),
    };
    clap_complete::generate(shell, &mut Cli::command(), APP_NAME, &mut io::stdout());
    Ok(())
}

pub fn run(command: Command, data_dir: Option<&Path>) -> Result<()> {
    match command {
        Command::Toggle { date } => toggle(data_dir, &date).map(|_| ()),
        Command::Show { month } => show(data_dir, month.as_deref()),
        Command::Export { format, out } => export_data(data_dir, format, out),
        Command::Completions { shell } => print_completions(&shell),
    }
}
