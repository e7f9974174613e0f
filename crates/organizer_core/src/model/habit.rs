//! Habit record, starter set and per-day mark keys.
//!
//! # Invariants
//! - `target >= 1` and `current` stays within `[0, target]`.
//! - Daily marks live outside the habit record, keyed by `(habit id, day)`.

use crate::model::validation::ValidationError;
use crate::model::RecordId;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Storage key prefix shared by every daily mark.
pub const DAILY_MARK_PREFIX: &str = "habit_mark:";

static DAILY_MARK_KEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^habit_mark:(-?\d+):(\d{4}-\d{2}-\d{2})$").expect("valid daily mark regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitKind {
    Sleep,
    Study,
    Formulas,
    Water,
    Lab,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: RecordId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: HabitKind,
    pub target: u32,
    #[serde(default)]
    pub current: u32,
}

impl Habit {
    /// Moves `current` one step toward `target`; saturates at `target`.
    pub(crate) fn increment(&mut self) {
        self.current = self.current.saturating_add(1).min(self.target);
    }

    /// Moves `current` one step toward zero; saturates at zero.
    pub(crate) fn decrement(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    /// Display progress `current / target * 100`.
    ///
    /// Always within `[0, 100]` while `current` respects its bound.
    pub fn progress_percent(&self) -> f64 {
        if self.target == 0 {
            return 0.0;
        }
        f64::from(self.current) / f64::from(self.target) * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHabit {
    pub name: String,
    pub kind: HabitKind,
    pub target: u32,
}

impl NewHabit {
    /// User-defined habit with a once-a-day target.
    pub fn custom(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: HabitKind::Custom,
            target: 1,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.target == 0 {
            return Err(ValidationError::ZeroTarget);
        }
        Ok(())
    }
}

/// Habits inserted when the collection is empty at load.
pub fn starter_habits() -> Vec<Habit> {
    [
        (1, "Sleep well (8 hours)", HabitKind::Sleep, 8),
        (2, "Study pharmaceutical chemistry", HabitKind::Study, 120),
        (3, "Review formulas", HabitKind::Formulas, 1),
        (4, "Drink water", HabitKind::Water, 8),
        (5, "Prepare lab material", HabitKind::Lab, 1),
    ]
    .into_iter()
    .map(|(id, name, kind, target)| Habit {
        id,
        name: name.to_string(),
        kind,
        target,
        current: 0,
    })
    .collect()
}

/// Composite key of one daily mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DailyMarkKey {
    pub habit_id: RecordId,
    pub day: NaiveDate,
}

impl DailyMarkKey {
    pub fn new(habit_id: RecordId, day: NaiveDate) -> Self {
        Self { habit_id, day }
    }

    /// Storage form `habit_mark:<id>:<YYYY-MM-DD>`.
    pub fn storage_key(&self) -> String {
        format!(
            "{DAILY_MARK_PREFIX}{}:{}",
            self.habit_id,
            self.day.format("%Y-%m-%d")
        )
    }

    /// Parses a storage key; returns `None` for anything else.
    pub fn parse(key: &str) -> Option<Self> {
        let caps = DAILY_MARK_KEY_RE.captures(key)?;
        let habit_id = caps.get(1)?.as_str().parse().ok()?;
        let day = NaiveDate::parse_from_str(caps.get(2)?.as_str(), "%Y-%m-%d").ok()?;
        Some(Self { habit_id, day })
    }
}
