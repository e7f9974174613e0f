//! Task list projection: view scope, filters and deterministic ordering.
//!
//! # Invariants
//! - The input slice is never reordered; every call returns a fresh `Vec`.
//! - Ordering is priority rank desc, then deadline asc, undated last;
//!   remaining ties keep collection order (stable sort).

use crate::model::task::{Priority, Task, TaskStatus};
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::str::FromStr;

/// Task list scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Only tasks whose deadline falls on the current day.
    #[default]
    Today,
    /// Every task regardless of deadline.
    All,
}

/// One optional constraint; `All` disables it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter<T> {
    All,
    Only(T),
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: PartialEq> Filter<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }
}

impl<T: FromStr> FromStr for Filter<T> {
    type Err = T::Err;

    /// `"all"` (any case) is the sentinel; anything else parses as `T`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        value.parse().map(Self::Only)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    pub view: ViewMode,
    pub priority: Filter<Priority>,
    pub category: Filter<String>,
    pub status: Filter<TaskStatus>,
}

impl TaskQuery {
    /// Every task, no filters.
    pub fn all() -> Self {
        Self {
            view: ViewMode::All,
            ..Self::default()
        }
    }

    fn retains(&self, task: &Task, today: NaiveDate) -> bool {
        let in_view = match self.view {
            ViewMode::All => true,
            ViewMode::Today => task.deadline.is_some_and(|d| d.falls_on(today)),
        };
        in_view
            && self.priority.matches(&task.priority)
            && self.category.matches(&task.category)
            && self.status.matches(&task.status)
    }
}

/// Returns the filtered, ordered task list a presentation layer renders.
pub fn query_tasks(tasks: &[Task], query: &TaskQuery, today: NaiveDate) -> Vec<Task> {
    let mut selected: Vec<Task> = tasks
        .iter()
        .filter(|task| query.retains(task, today))
        .cloned()
        .collect();
    sort_tasks(&mut selected);
    selected
}

/// Stable in-place sort by urgency.
pub fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(compare_urgency);
}

/// Total order used by the task list.
pub fn compare_urgency(a: &Task, b: &Task) -> Ordering {
    b.priority
        .rank()
        .cmp(&a.priority.rank())
        .then_with(|| match (a.deadline, b.deadline) {
            (Some(left), Some(right)) => left.instant().cmp(&right.instant()),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

#[cfg(test)]
mod tests {
    use super::{Filter, ViewMode};
    use crate::model::task::Priority;

    #[test]
    fn filter_parses_all_sentinel() {
        assert_eq!("ALL".parse::<Filter<Priority>>().unwrap(), Filter::All);
        assert_eq!(
            "low".parse::<Filter<Priority>>().unwrap(),
            Filter::Only(Priority::Low)
        );
        assert!("urgent".parse::<Filter<Priority>>().is_err());
    }

    #[test]
    fn default_view_is_today() {
        assert_eq!(ViewMode::default(), ViewMode::Today);
    }
}
