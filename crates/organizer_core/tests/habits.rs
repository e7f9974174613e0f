use chrono::NaiveDate;
use organizer_core::model::habit::DAILY_MARK_PREFIX;
use organizer_core::service::record_store::HABITS_KEY;
use organizer_core::{
    DailyMarkKey, HabitKind, KeyValueRepository, MemoryKeyValueRepository, NewHabit, RecordStore,
    RepoError, RepoResult, StoreError, ValidationError,
};
use std::cell::Cell;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, d).unwrap()
}

#[test]
fn toggling_twice_in_one_day_restores_counter_and_mark() {
    let repo = MemoryKeyValueRepository::new();
    let mut store = RecordStore::new(&repo);
    store.load_on(day(10)).unwrap();
    let water = store.habit(4).unwrap().clone();
    assert_eq!(water.kind, HabitKind::Water);

    let on = store.toggle_habit_on(4, day(10)).unwrap();
    assert!(on.marked);
    assert_eq!(on.current, water.current + 1);
    assert!(store.is_habit_marked(4, day(10)).unwrap());

    let off = store.toggle_habit_on(4, day(10)).unwrap();
    assert!(!off.marked);
    assert_eq!(off.current, water.current);
    assert!(!store.is_habit_marked(4, day(10)).unwrap());
    assert_eq!(store.habit(4), Some(&water));
}

#[test]
fn counter_carries_over_to_the_next_day() {
    let repo = MemoryKeyValueRepository::new();
    let mut store = RecordStore::new(&repo);
    store.load_on(day(10)).unwrap();

    store.toggle_habit_on(1, day(10)).unwrap();
    let next_day = store.toggle_habit_on(1, day(11)).unwrap();
    assert!(next_day.marked);
    assert_eq!(next_day.current, 2);
}

#[test]
fn counter_is_clamped_to_target() {
    let repo = MemoryKeyValueRepository::new();
    let mut store = RecordStore::new(&repo);
    store.load_on(day(1)).unwrap();
    // Habit 3 (formulas) has a target of one.
    for d in 1..=3 {
        store.toggle_habit_on(3, day(d)).unwrap();
    }
    let habit = store.habit(3).unwrap();
    assert_eq!(habit.current, habit.target);
    assert!((habit.progress_percent() - 100.0).abs() < f64::EPSILON);
}

#[test]
fn toggle_pair_at_target_keeps_earlier_progress() {
    let repo = MemoryKeyValueRepository::new();
    let mut store = RecordStore::new(&repo);
    store.load_on(day(1)).unwrap();
    store.toggle_habit_on(3, day(1)).unwrap();
    let before = store.habit(3).unwrap().clone();
    assert_eq!(before.current, 1);

    let on = store.toggle_habit_on(3, day(2)).unwrap();
    assert!(on.marked);
    assert_eq!(on.current, 1);
    assert!(store.is_habit_marked(3, day(2)).unwrap());

    let off = store.toggle_habit_on(3, day(2)).unwrap();
    assert!(!off.marked);
    assert_eq!(off.current, 1);
    assert!(!store.is_habit_marked(3, day(2)).unwrap());
    assert_eq!(store.habit(3), Some(&before));

    // Day one's mark did move the counter, so undoing it still decrements.
    let undo = store.toggle_habit_on(3, day(1)).unwrap();
    assert_eq!(undo.current, 0);
}

/// Memory repository whose writes fail for keys under a chosen prefix.
struct FlakyRepository {
    inner: MemoryKeyValueRepository,
    failing_prefix: Cell<Option<&'static str>>,
}

impl FlakyRepository {
    fn new() -> Self {
        Self {
            inner: MemoryKeyValueRepository::new(),
            failing_prefix: Cell::new(None),
        }
    }

    fn fail_writes_to(&self, prefix: &'static str) {
        self.failing_prefix.set(Some(prefix));
    }

    fn check(&self, key: &str) -> RepoResult<()> {
        match self.failing_prefix.get() {
            Some(prefix) if key.starts_with(prefix) => {
                Err(RepoError::MissingRequiredTable("kv_entries"))
            }
            _ => Ok(()),
        }
    }
}

impl KeyValueRepository for FlakyRepository {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        self.check(key)?;
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> RepoResult<()> {
        self.check(key)?;
        self.inner.remove(key)
    }

    fn keys_with_prefix(&self, prefix: &str) -> RepoResult<Vec<String>> {
        self.inner.keys_with_prefix(prefix)
    }
}

#[test]
fn failed_mark_write_leaves_counter_untouched() {
    let repo = FlakyRepository::new();
    let mut store = RecordStore::new(&repo);
    store.load_on(day(10)).unwrap();
    let stored_before = repo.get(HABITS_KEY).unwrap();
    repo.fail_writes_to(DAILY_MARK_PREFIX);

    for _ in 0..2 {
        let err = store.toggle_habit_on(4, day(10)).unwrap_err();
        assert!(matches!(err, StoreError::Repo(_)));
    }

    assert_eq!(store.habit(4).unwrap().current, 0);
    assert_eq!(repo.get(HABITS_KEY).unwrap(), stored_before);
    assert!(!store.is_habit_marked(4, day(10)).unwrap());
}

#[test]
fn failed_habits_write_restores_the_mark() {
    let repo = FlakyRepository::new();
    let mut store = RecordStore::new(&repo);
    store.load_on(day(10)).unwrap();
    store.toggle_habit_on(4, day(10)).unwrap();
    repo.fail_writes_to(HABITS_KEY);

    let err = store.toggle_habit_on(4, day(10)).unwrap_err();
    assert!(matches!(err, StoreError::Repo(_)));
    assert!(store.is_habit_marked(4, day(10)).unwrap());
    assert_eq!(store.habit(4).unwrap().current, 1);

    repo.failing_prefix.set(None);
    let off = store.toggle_habit_on(4, day(10)).unwrap();
    assert!(!off.marked);
    assert_eq!(off.current, 0);
}

#[test]
fn load_prunes_marks_from_earlier_days() {
    let repo = MemoryKeyValueRepository::new();
    {
        let mut store = RecordStore::new(&repo);
        store.load_on(day(9)).unwrap();
        store.toggle_habit_on(2, day(9)).unwrap();
        store.toggle_habit_on(2, day(10)).unwrap();
    }

    let mut store = RecordStore::new(&repo);
    let report = store.load_on(day(10)).unwrap();
    assert_eq!(report.pruned_marks, 1);
    assert!(repo
        .get(&DailyMarkKey::new(2, day(9)).storage_key())
        .unwrap()
        .is_none());
    assert!(store.is_habit_marked(2, day(10)).unwrap());
    assert_eq!(store.habit(2).unwrap().current, 2);
}

#[test]
fn custom_habits_start_at_zero_with_target_one() {
    let repo = MemoryKeyValueRepository::new();
    let mut store = RecordStore::new(&repo);
    store.load_on(day(10)).unwrap();

    let habit = store.add_custom_habit("Stretch").unwrap();
    assert_eq!(habit.kind, HabitKind::Custom);
    assert_eq!(habit.target, 1);
    assert_eq!(habit.current, 0);
    assert_eq!(store.habits().len(), 6);

    let err = store
        .create_habit(NewHabit {
            name: "Run".to_string(),
            kind: HabitKind::Custom,
            target: 0,
        })
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(ValidationError::ZeroTarget)));
    let err = store.add_custom_habit("  ").unwrap_err();
    assert!(matches!(err, StoreError::Validation(ValidationError::EmptyName)));
}
