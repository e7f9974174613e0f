use chrono::NaiveDate;
use organizer_core::{Deadline, Filter, Priority, TaskStatus};
use std::path::PathBuf;
use structopt::StructOpt;

fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
}

/// On/off argument; a plain `bool` would be read as a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Switch(pub bool);

fn parse_switch(value: &str) -> Result<Switch, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" => Ok(Switch(true)),
        "off" | "false" => Ok(Switch(false)),
        other => Err(format!("expected on|off, got `{other}`")),
    }
}

#[derive(Debug, StructOpt)]
pub enum Command {
    /// Show pending/urgent counters and today's achievements.
    Summary,
    /// List tasks, sorted by urgency.
    Tasks {
        /// Show every task instead of only those due today.
        #[structopt(long)]
        all: bool,
        /// high|medium|low|all
        #[structopt(long, default_value = "all")]
        priority: Filter<Priority>,
        #[structopt(long, default_value = "all")]
        category: Filter<String>,
        /// pending|in-progress|completed|all
        #[structopt(long, default_value = "all")]
        status: Filter<TaskStatus>,
    },
    /// Add a task.
    AddTask {
        title: String,
        #[structopt(long)]
        description: Option<String>,
        /// YYYY-MM-DD or YYYY-MM-DDTHH:MM
        #[structopt(long)]
        deadline: Option<Deadline>,
        #[structopt(long, default_value = "medium")]
        priority: Priority,
        #[structopt(long, default_value = "")]
        category: String,
    },
    /// Edit fields of an existing task.
    EditTask {
        id: i64,
        #[structopt(long)]
        title: Option<String>,
        #[structopt(long)]
        description: Option<String>,
        #[structopt(long)]
        deadline: Option<Deadline>,
        /// Remove the deadline.
        #[structopt(long, conflicts_with = "deadline")]
        undated: bool,
        #[structopt(long)]
        priority: Option<Priority>,
        #[structopt(long)]
        category: Option<String>,
        #[structopt(long)]
        status: Option<TaskStatus>,
    },
    /// Advance a task to its next status.
    CycleTask { id: i64 },
    /// Delete a task.
    RmTask {
        id: i64,
        /// Confirm the deletion.
        #[structopt(long)]
        yes: bool,
    },
    /// Print the month grid; `*` marks days with deadlines.
    Calendar {
        #[structopt(long)]
        year: Option<i32>,
        /// Month number, 1-12.
        #[structopt(long)]
        month: Option<u32>,
    },
    /// List tasks due on a day (YYYY-MM-DD).
    Day {
        #[structopt(parse(try_from_str = parse_date))]
        date: NaiveDate,
    },
    /// List notes, optionally filtered by a search term.
    Notes {
        #[structopt(long)]
        search: Option<String>,
    },
    /// Add a note.
    AddNote {
        title: String,
        #[structopt(default_value = "")]
        content: String,
        /// Comma-separated tags.
        #[structopt(long, default_value = "")]
        tags: String,
        #[structopt(long)]
        category: Option<String>,
    },
    /// Delete a note.
    RmNote {
        id: i64,
        #[structopt(long)]
        yes: bool,
    },
    /// Show habits with today's marks.
    Habits,
    /// Toggle today's mark for a habit.
    ToggleHabit { id: i64 },
    /// Add a custom habit.
    AddHabit { name: String },
    /// Show or replace the weekly goals text.
    Goals { text: Option<String> },
    /// Show or set the night mode preference.
    NightMode {
        /// on|off
        #[structopt(parse(try_from_str = parse_switch))]
        value: Option<Switch>,
    },
    /// Print the initial focus countdown.
    Focus {
        #[structopt(long)]
        minutes: Option<u32>,
    },
    /// Print the core version.
    Version,
}

#[derive(Debug, StructOpt)]
#[structopt(name = "organizer", about = "Tasks, notes and habits from the terminal.")]
pub struct CommandLineArgs {
    #[structopt(subcommand)]
    pub action: Command,

    /// Use a different database file.
    #[structopt(parse(from_os_str), short, long)]
    pub db: Option<PathBuf>,
}
