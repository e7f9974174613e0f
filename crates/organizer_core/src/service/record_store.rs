//! Record store: session owner of tasks, notes and habits.
//!
//! # Responsibility
//! - Hydrate the three collections from key-value storage.
//! - Apply create/update/delete/cycle/toggle mutations and persist each one.
//!
//! # Invariants
//! - Every mutation persists before returning `Ok`; a failed write leaves
//!   the in-memory collection unchanged.
//! - Ids are unique across a collection for the lifetime of the store.
//! - A habit toggle writes its daily mark before the habits blob and
//!   restores the previous mark when the blob write fails.
//! - Starter habits are seeded only when the habit collection is empty at load.
//! - Read-side projections borrow slices; they never mutate the store.

use crate::model::habit::{starter_habits, DailyMarkKey, Habit, NewHabit};
use crate::model::note::{clean_tags, normalize_category, NewNote, Note, NotePatch};
use crate::model::task::{NewTask, Task, TaskPatch, TaskStatus};
use crate::model::validation::ValidationError;
use crate::model::RecordId;
use crate::repo::kv_repo::{KeyValueRepository, RepoError};
use crate::service::daily_marks::{self, MarkState};
use crate::service::preferences::Preferences;
use chrono::{Local, NaiveDate, Utc};
use log::{error, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const TASKS_KEY: &str = "tasks";
pub const NOTES_KEY: &str = "notes";
pub const HABITS_KEY: &str = "habits";

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Task,
    Note,
    Habit,
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Task => "task",
            Self::Note => "note",
            Self::Habit => "habit",
        })
    }
}

/// Record store failure.
#[derive(Debug)]
pub enum StoreError {
    /// Caller passed an id that is not in the current collection.
    NotFound { kind: RecordKind, id: RecordId },
    Validation(ValidationError),
    Repo(RepoError),
    /// A stored blob could not be decoded at load.
    Corrupt {
        key: &'static str,
        source: serde_json::Error,
    },
    /// A collection could not be encoded for persistence.
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Corrupt { key, source } => {
                write!(f, "stored entry `{key}` is not a valid collection: {source}")
            }
            Self::Encode(err) => write!(f, "failed to encode collection: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Corrupt { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// What a `load` call did beyond reading the collections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Starter habits inserted because the collection was empty.
    pub seeded_habits: usize,
    /// Daily marks from earlier days removed from storage.
    pub pruned_marks: usize,
}

/// Outcome of toggling a habit's daily mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HabitToggle {
    /// Whether the day is marked after the toggle.
    pub marked: bool,
    /// Habit counter after the toggle.
    pub current: u32,
}

pub struct RecordStore<R: KeyValueRepository> {
    repo: R,
    tasks: Vec<Task>,
    notes: Vec<Note>,
    habits: Vec<Habit>,
    last_id: RecordId,
}

impl<R: KeyValueRepository> RecordStore<R> {
    /// Creates an empty store over `repo`; nothing is read until `load`.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            tasks: Vec::new(),
            notes: Vec::new(),
            habits: Vec::new(),
            last_id: 0,
        }
    }

    /// Creates a store and loads it against the local calendar day.
    pub fn open(repo: R) -> StoreResult<Self> {
        let mut store = Self::new(repo);
        store.load()?;
        Ok(store)
    }

    pub fn load(&mut self) -> StoreResult<LoadReport> {
        self.load_on(Local::now().date_naive())
    }

    /// Replaces the in-memory collections with what storage holds.
    ///
    /// Absent entries read as empty collections. A blob that fails to
    /// decode aborts the load with `StoreError::Corrupt`.
    pub fn load_on(&mut self, today: NaiveDate) -> StoreResult<LoadReport> {
        let tasks: Vec<Task> = self.read_collection(TASKS_KEY)?;
        let notes: Vec<Note> = self.read_collection(NOTES_KEY)?;
        let mut habits: Vec<Habit> = self.read_collection(HABITS_KEY)?;

        let mut report = LoadReport::default();
        if habits.is_empty() {
            habits = starter_habits();
            self.write_collection(HABITS_KEY, &habits)?;
            report.seeded_habits = habits.len();
        }
        report.pruned_marks = daily_marks::prune_before(&self.repo, today)?;

        self.last_id = tasks
            .iter()
            .map(|task| task.id)
            .chain(notes.iter().map(|note| note.id))
            .chain(habits.iter().map(|habit| habit.id))
            .max()
            .unwrap_or(0);
        self.tasks = tasks;
        self.notes = notes;
        self.habits = habits;

        info!(
            "event=store_load module=store status=ok tasks={} notes={} habits={} seeded={} pruned_marks={}",
            self.tasks.len(),
            self.notes.len(),
            self.habits.len(),
            report.seeded_habits,
            report.pruned_marks
        );
        Ok(report)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn task(&self, id: RecordId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn note(&self, id: RecordId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn habit(&self, id: RecordId) -> Option<&Habit> {
        self.habits.iter().find(|habit| habit.id == id)
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Tears the store down and hands back its repository.
    pub fn into_repo(self) -> R {
        self.repo
    }

    pub fn preferences(&self) -> Preferences<'_, R> {
        Preferences::new(&self.repo)
    }

    pub fn create_task(&mut self, fields: NewTask) -> StoreResult<Task> {
        fields.validate()?;
        let task = Task {
            id: self.next_id(),
            title: fields.title,
            description: fields.description,
            deadline: fields.deadline,
            priority: fields.priority,
            category: fields.category,
            status: fields.status,
            created_at: Utc::now(),
        };

        let mut next = self.tasks.clone();
        next.push(task.clone());
        self.commit_tasks(next)?;
        info!("event=task_create module=store status=ok id={}", task.id);
        Ok(task)
    }

    /// Merges `patch` onto the task; unspecified fields are retained.
    pub fn update_task(&mut self, id: RecordId, patch: TaskPatch) -> StoreResult<Task> {
        patch.validate()?;
        let mut next = self.tasks.clone();
        let task = find_mut(&mut next, RecordKind::Task, id, |task| task.id)?;
        task.apply(patch);
        let updated = task.clone();

        self.commit_tasks(next)?;
        info!("event=task_update module=store status=ok id={id}");
        Ok(updated)
    }

    /// Removes a task. Callers must have obtained user confirmation first.
    pub fn delete_task(&mut self, id: RecordId) -> StoreResult<()> {
        let next = without(&self.tasks, RecordKind::Task, id, |task| task.id)?;
        self.commit_tasks(next)?;
        info!("event=task_delete module=store status=ok id={id}");
        Ok(())
    }

    /// Advances pending -> in-progress -> completed -> pending.
    pub fn cycle_task_status(&mut self, id: RecordId) -> StoreResult<TaskStatus> {
        let mut next = self.tasks.clone();
        let task = find_mut(&mut next, RecordKind::Task, id, |task| task.id)?;
        task.status = task.status.next();
        let status = task.status;

        self.commit_tasks(next)?;
        info!(
            "event=task_cycle module=store status=ok id={id} task_status={}",
            status.as_str()
        );
        Ok(status)
    }

    pub fn create_note(&mut self, fields: NewNote) -> StoreResult<Note> {
        fields.validate()?;
        let note = Note {
            id: self.next_id(),
            title: fields.title,
            content: fields.content,
            tags: clean_tags(fields.tags),
            category: normalize_category(fields.category),
            created_at: Utc::now(),
        };

        let mut next = self.notes.clone();
        next.push(note.clone());
        self.commit_notes(next)?;
        info!("event=note_create module=store status=ok id={}", note.id);
        Ok(note)
    }

    pub fn update_note(&mut self, id: RecordId, patch: NotePatch) -> StoreResult<Note> {
        patch.validate()?;
        let mut next = self.notes.clone();
        let note = find_mut(&mut next, RecordKind::Note, id, |note| note.id)?;
        note.apply(patch);
        let updated = note.clone();

        self.commit_notes(next)?;
        info!("event=note_update module=store status=ok id={id}");
        Ok(updated)
    }

    /// Removes a note. Callers must have obtained user confirmation first.
    pub fn delete_note(&mut self, id: RecordId) -> StoreResult<()> {
        let next = without(&self.notes, RecordKind::Note, id, |note| note.id)?;
        self.commit_notes(next)?;
        info!("event=note_delete module=store status=ok id={id}");
        Ok(())
    }

    pub fn create_habit(&mut self, fields: NewHabit) -> StoreResult<Habit> {
        fields.validate()?;
        let habit = Habit {
            id: self.next_id(),
            name: fields.name,
            kind: fields.kind,
            target: fields.target,
            current: 0,
        };

        let mut next = self.habits.clone();
        next.push(habit.clone());
        self.write_collection(HABITS_KEY, &next)?;
        self.habits = next;
        info!("event=habit_create module=store status=ok id={}", habit.id);
        Ok(habit)
    }

    /// Adds a custom habit with a target of one per day.
    pub fn add_custom_habit(&mut self, name: impl Into<String>) -> StoreResult<Habit> {
        self.create_habit(NewHabit::custom(name))
    }

    pub fn toggle_habit_today(&mut self, habit_id: RecordId) -> StoreResult<HabitToggle> {
        self.toggle_habit_on(habit_id, Local::now().date_naive())
    }

    /// Flips the daily mark for `day` and moves the counter with it.
    ///
    /// Marking increments `current` up to `target`; unmarking undoes exactly
    /// what the mark did, so a same-day pair of toggles is a no-op even when
    /// the counter was already at its target. The counter is never reset
    /// when the day changes.
    pub fn toggle_habit_on(&mut self, habit_id: RecordId, day: NaiveDate) -> StoreResult<HabitToggle> {
        let key = DailyMarkKey::new(habit_id, day);
        let previous = daily_marks::mark_state(&self.repo, key)?;

        let mut next = self.habits.clone();
        let habit = find_mut(&mut next, RecordKind::Habit, habit_id, |habit| habit.id)?;
        let mark = match previous {
            MarkState::Unmarked => {
                let before = habit.current;
                habit.increment();
                if habit.current > before {
                    MarkState::Counted
                } else {
                    MarkState::Saturated
                }
            }
            MarkState::Counted => {
                habit.decrement();
                MarkState::Unmarked
            }
            MarkState::Saturated => MarkState::Unmarked,
        };
        let current = habit.current;

        daily_marks::write_mark(&self.repo, key, mark)?;
        if let Err(err) = self.write_collection(HABITS_KEY, &next) {
            if let Err(undo) = daily_marks::write_mark(&self.repo, key, previous) {
                error!(
                    "event=habit_toggle module=store status=error id={habit_id} error_code=mark_rollback_failed error={undo}"
                );
            }
            return Err(err);
        }
        self.habits = next;

        let marked = mark != MarkState::Unmarked;
        info!("event=habit_toggle module=store status=ok id={habit_id} marked={marked} current={current}");
        Ok(HabitToggle { marked, current })
    }

    pub fn is_habit_marked(&self, habit_id: RecordId, day: NaiveDate) -> StoreResult<bool> {
        Ok(daily_marks::is_marked(
            &self.repo,
            DailyMarkKey::new(habit_id, day),
        )?)
    }

    fn next_id(&mut self) -> RecordId {
        let id = Utc::now().timestamp_millis().max(self.last_id + 1);
        self.last_id = id;
        id
    }

    fn commit_tasks(&mut self, next: Vec<Task>) -> StoreResult<()> {
        self.write_collection(TASKS_KEY, &next)?;
        self.tasks = next;
        Ok(())
    }

    fn commit_notes(&mut self, next: Vec<Note>) -> StoreResult<()> {
        self.write_collection(NOTES_KEY, &next)?;
        self.notes = next;
        Ok(())
    }

    fn read_collection<T: DeserializeOwned>(&self, key: &'static str) -> StoreResult<Vec<T>> {
        let Some(raw) = self.repo.get(key)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(|source| {
            error!("event=store_load module=store status=error key={key} error_code=corrupt_blob");
            StoreError::Corrupt { key, source }
        })
    }

    fn write_collection<T: Serialize>(&self, key: &'static str, items: &[T]) -> StoreResult<()> {
        let encoded = serde_json::to_string(items).map_err(StoreError::Encode)?;
        self.repo.set(key, &encoded).map_err(|err| {
            error!("event=store_write module=store status=error key={key} error={err}");
            StoreError::from(err)
        })
    }
}

fn find_mut<T>(
    items: &mut [T],
    kind: RecordKind,
    id: RecordId,
    id_of: impl Fn(&T) -> RecordId,
) -> StoreResult<&mut T> {
    let position = items
        .iter()
        .position(|item| id_of(item) == id)
        .ok_or(StoreError::NotFound { kind, id })?;
    Ok(&mut items[position])
}

fn without<T: Clone>(
    items: &[T],
    kind: RecordKind,
    id: RecordId,
    id_of: impl Fn(&T) -> RecordId,
) -> StoreResult<Vec<T>> {
    if !items.iter().any(|item| id_of(item) == id) {
        return Err(StoreError::NotFound { kind, id });
    }
    Ok(items.iter().filter(|&item| id_of(item) != id).cloned().collect())
}
