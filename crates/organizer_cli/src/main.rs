//! Command-line front end for the organizer core.
//!
//! # Responsibility
//! - Parse commands, open the store and render plain-text output.
//! - Own the confirmation gate for destructive commands.

use organizer_core::db::open_db;
use organizer_core::{
    init_logging_from_config, CoreConfig, NewTask, RecordStore, SqliteKeyValueRepository,
    TaskPatch, TaskQuery, TaskStatus, ViewMode,
};
use structopt::StructOpt;

mod cli;
mod interface;

use cli::{Command::*, CommandLineArgs};

fn main() -> anyhow::Result<()> {
    let CommandLineArgs { action, db } = CommandLineArgs::from_args();

    let mut config = CoreConfig::from_env()?;
    if let Some(path) = db {
        config.db_path = path;
    }
    init_logging_from_config(&config)?;

    if let Version = action {
        println!("organizer_core version={}", organizer_core::core_version());
        return Ok(());
    }

    let conn = open_db(&config.db_path)?;
    let repo = SqliteKeyValueRepository::try_new(&conn)?;
    let mut store = RecordStore::open(repo)?;

    match action {
        Summary => interface::summary(&store),
        Tasks {
            all,
            priority,
            category,
            status,
        } => interface::list_tasks(
            &store,
            TaskQuery {
                view: if all { ViewMode::All } else { ViewMode::Today },
                priority,
                category,
                status,
            },
        ),
        AddTask {
            title,
            description,
            deadline,
            priority,
            category,
        } => interface::add_task(
            &mut store,
            NewTask {
                title,
                description,
                deadline,
                priority,
                category,
                status: TaskStatus::Pending,
            },
        ),
        EditTask {
            id,
            title,
            description,
            deadline,
            undated,
            priority,
            category,
            status,
        } => interface::edit_task(
            &mut store,
            id,
            TaskPatch {
                title,
                description: description.map(Some),
                deadline: if undated { Some(None) } else { deadline.map(Some) },
                priority,
                category,
                status,
            },
        ),
        CycleTask { id } => interface::cycle_task(&mut store, id),
        RmTask { id, yes } => interface::remove_task(&mut store, id, yes),
        Calendar { year, month } => interface::calendar(&store, year, month),
        Day { date } => interface::day(&store, date),
        Notes { search } => interface::list_notes(&store, search),
        AddNote {
            title,
            content,
            tags,
            category,
        } => interface::add_note(&mut store, title, content, &tags, category),
        RmNote { id, yes } => interface::remove_note(&mut store, id, yes),
        Habits => interface::habits(&store),
        ToggleHabit { id } => interface::toggle_habit(&mut store, id),
        AddHabit { name } => interface::add_habit(&mut store, name),
        Goals { text } => interface::goals(&store, text),
        NightMode { value } => interface::night_mode(&store, value.map(|switch| switch.0)),
        Focus { minutes } => {
            interface::focus(&store, minutes.unwrap_or(config.focus_minutes))
        }
        Version => Ok(()),
    }
}
