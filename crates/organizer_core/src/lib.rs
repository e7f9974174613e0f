//! Core domain logic for the personal organizer.
//! This crate owns tasks, notes and habits, their persistence and every
//! read-side projection a presentation layer renders.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;

pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::deadline::Deadline;
pub use model::habit::{DailyMarkKey, Habit, HabitKind, NewHabit};
pub use model::note::{parse_tags, NewNote, Note, NotePatch};
pub use model::task::{NewTask, Priority, Task, TaskPatch, TaskStatus};
pub use model::validation::ValidationError;
pub use model::RecordId;
pub use query::calendar::{
    build_month_grid, tasks_due_on, CalendarCell, CalendarError, MonthCursor, MonthGrid,
};
pub use query::task_query::{query_tasks, Filter, TaskQuery, ViewMode};
pub use repo::kv_repo::{
    KeyValueRepository, MemoryKeyValueRepository, RepoError, RepoResult, SqliteKeyValueRepository,
};
pub use service::focus_timer::{FocusTimer, TimerTick};
pub use service::preferences::Preferences;
pub use service::record_store::{
    HabitToggle, LoadReport, RecordKind, RecordStore, StoreError, StoreResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
