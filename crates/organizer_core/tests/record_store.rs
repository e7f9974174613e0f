use chrono::NaiveDate;
use organizer_core::db::open_db;
use organizer_core::service::record_store::{HABITS_KEY, NOTES_KEY, TASKS_KEY};
use organizer_core::{
    KeyValueRepository, MemoryKeyValueRepository, NewTask, Priority, RecordKind, RecordStore,
    SqliteKeyValueRepository, StoreError, TaskPatch, TaskStatus, ValidationError,
};
use std::collections::HashSet;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 10).unwrap()
}

fn loaded_store(repo: &MemoryKeyValueRepository) -> RecordStore<&MemoryKeyValueRepository> {
    let mut store = RecordStore::new(repo);
    store.load_on(today()).unwrap();
    store
}

#[test]
fn first_load_seeds_five_habits_and_second_load_seeds_none() {
    let repo = MemoryKeyValueRepository::new();
    let mut store = RecordStore::new(&repo);

    let first = store.load_on(today()).unwrap();
    assert_eq!(first.seeded_habits, 5);
    assert_eq!(store.habits().len(), 5);
    assert!(store.habits().iter().all(|habit| habit.current == 0));
    assert!(repo.get(HABITS_KEY).unwrap().is_some());

    let second = store.load_on(today()).unwrap();
    assert_eq!(second.seeded_habits, 0);
    assert_eq!(store.habits().len(), 5);
}

#[test]
fn absent_entries_load_as_empty_collections() {
    let repo = MemoryKeyValueRepository::new();
    let store = loaded_store(&repo);
    assert!(store.tasks().is_empty());
    assert!(store.notes().is_empty());
}

#[test]
fn corrupt_blob_is_fatal_at_load() {
    let repo = MemoryKeyValueRepository::new();
    repo.set(NOTES_KEY, "{not json").unwrap();

    let err = RecordStore::new(&repo).load_on(today()).unwrap_err();
    assert!(matches!(err, StoreError::Corrupt { key, .. } if key == NOTES_KEY));
}

#[test]
fn create_task_stamps_unique_ids_and_persists_immediately() {
    let repo = MemoryKeyValueRepository::new();
    let mut store = loaded_store(&repo);

    let mut ids = HashSet::new();
    for idx in 0..20 {
        let task = store.create_task(NewTask::titled(format!("task {idx}"))).unwrap();
        assert!(ids.insert(task.id), "duplicate id {}", task.id);
    }

    let stored = repo.get(TASKS_KEY).unwrap().unwrap();
    let mut reloaded = RecordStore::new(&repo);
    reloaded.load_on(today()).unwrap();
    assert_eq!(reloaded.tasks().len(), 20);
    assert!(stored.contains("\"createdAt\""));
}

#[test]
fn ids_stay_unique_past_persisted_records() {
    let repo = MemoryKeyValueRepository::new();
    repo.set(
        TASKS_KEY,
        r#"[{"id":99999999999999,"title":"from the future","priority":"low","category":"","status":"pending","createdAt":"2024-12-01T00:00:00Z"}]"#,
    )
    .unwrap();
    let mut store = loaded_store(&repo);

    let created = store.create_task(NewTask::titled("next")).unwrap();
    assert!(created.id > 99_999_999_999_999);
}

#[test]
fn blank_title_is_rejected_without_writing() {
    let repo = MemoryKeyValueRepository::new();
    let mut store = loaded_store(&repo);

    let err = store.create_task(NewTask::titled("   ")).unwrap_err();
    assert!(matches!(err, StoreError::Validation(ValidationError::EmptyTitle)));
    assert!(repo.get(TASKS_KEY).unwrap().is_none());
}

#[test]
fn update_task_merges_only_supplied_fields() {
    let repo = MemoryKeyValueRepository::new();
    let mut store = loaded_store(&repo);
    let created = store
        .create_task(NewTask {
            title: "Titration".to_string(),
            description: Some("acid/base".to_string()),
            deadline: Some("2024-12-12".parse().unwrap()),
            priority: Priority::Low,
            category: "lab".to_string(),
            status: TaskStatus::Pending,
        })
        .unwrap();

    let updated = store
        .update_task(
            created.id,
            TaskPatch {
                priority: Some(Priority::High),
                deadline: Some(None),
                ..TaskPatch::default()
            },
        )
        .unwrap();

    assert_eq!(updated.priority, Priority::High);
    assert_eq!(updated.deadline, None);
    assert_eq!(updated.title, "Titration");
    assert_eq!(updated.description.as_deref(), Some("acid/base"));
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(store.task(created.id), Some(&updated));
}

#[test]
fn unknown_ids_fail_with_not_found() {
    let repo = MemoryKeyValueRepository::new();
    let mut store = loaded_store(&repo);

    let err = store.update_task(7, TaskPatch::default()).unwrap_err();
    assert!(matches!(err, StoreError::NotFound { kind: RecordKind::Task, id: 7 }));
    let err = store.delete_task(7).unwrap_err();
    assert!(matches!(err, StoreError::NotFound { kind: RecordKind::Task, .. }));
    let err = store.cycle_task_status(7).unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
    let err = store.delete_note(7).unwrap_err();
    assert!(matches!(err, StoreError::NotFound { kind: RecordKind::Note, .. }));
    let err = store.toggle_habit_on(777, today()).unwrap_err();
    assert!(matches!(err, StoreError::NotFound { kind: RecordKind::Habit, .. }));
}

#[test]
fn cycle_status_wraps_after_three_steps() {
    let repo = MemoryKeyValueRepository::new();
    let mut store = loaded_store(&repo);
    let task = store.create_task(NewTask::titled("cycle me")).unwrap();

    assert_eq!(store.cycle_task_status(task.id).unwrap(), TaskStatus::InProgress);
    assert_eq!(store.cycle_task_status(task.id).unwrap(), TaskStatus::Completed);
    assert_eq!(store.cycle_task_status(task.id).unwrap(), TaskStatus::Pending);

    let mut reloaded = RecordStore::new(&repo);
    reloaded.load_on(today()).unwrap();
    assert_eq!(reloaded.task(task.id).unwrap().status, TaskStatus::Pending);
}

#[test]
fn delete_task_removes_it_from_storage() {
    let repo = MemoryKeyValueRepository::new();
    let mut store = loaded_store(&repo);
    let keep = store.create_task(NewTask::titled("keep")).unwrap();
    let removed = store.create_task(NewTask::titled("drop")).unwrap();

    store.delete_task(removed.id).unwrap();
    assert!(store.task(removed.id).is_none());

    let mut reloaded = RecordStore::new(&repo);
    reloaded.load_on(today()).unwrap();
    let ids: Vec<_> = reloaded.tasks().iter().map(|task| task.id).collect();
    assert_eq!(ids, vec![keep.id]);
}

#[test]
fn sqlite_backed_store_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("organizer.sqlite3");

    let task_id = {
        let conn = open_db(&path).unwrap();
        let repo = SqliteKeyValueRepository::try_new(&conn).unwrap();
        let mut store = RecordStore::new(repo);
        store.load_on(today()).unwrap();
        let created = store.create_task(NewTask::titled("persisted")).unwrap();
        created.id
    };

    let conn = open_db(&path).unwrap();
    let repo = SqliteKeyValueRepository::try_new(&conn).unwrap();
    let mut store = RecordStore::new(repo);
    let report = store.load_on(today()).unwrap();
    assert_eq!(report.seeded_habits, 0);
    assert_eq!(store.task(task_id).unwrap().title, "persisted");
}
