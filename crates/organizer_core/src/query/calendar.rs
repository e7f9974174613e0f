//! Month grid aggregation over task deadlines.
//!
//! # Responsibility
//! - Build the fixed 6x7 grid for a year and zero-based month index.
//! - Flag today and days carrying at least one task deadline.
//! - Resolve a selected day to the tasks due on it.
//!
//! # Invariants
//! - A grid always has exactly 42 cells, Sunday first.
//! - Other-month cells never carry `is_today`/`has_events` and cannot be selected.

use crate::model::task::Task;
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const GRID_CELLS: usize = 42;
pub const WEEK_DAYS: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// Month index outside `0..=11`.
    InvalidMonth(u32),
    /// Year outside the supported calendar range.
    InvalidYear(i32),
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMonth(month) => write!(f, "month index {month} is outside 0..=11"),
            Self::InvalidYear(year) => write!(f, "year {year} is outside the supported range"),
        }
    }
}

impl Error for CalendarError {}

/// Year plus zero-based month index, with wrap-around navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    pub year: i32,
    pub month0: u32,
}

impl MonthCursor {
    pub fn new(year: i32, month0: u32) -> Result<Self, CalendarError> {
        if month0 > 11 {
            return Err(CalendarError::InvalidMonth(month0));
        }
        Ok(Self { year, month0 })
    }

    /// Month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month0: date.month0(),
        }
    }

    pub fn previous(self) -> Self {
        match self.month0 {
            0 => Self {
                year: self.year - 1,
                month0: 11,
            },
            month0 => Self {
                year: self.year,
                month0: month0 - 1,
            },
        }
    }

    pub fn next(self) -> Self {
        match self.month0 {
            11 => Self {
                year: self.year + 1,
                month0: 0,
            },
            month0 => Self {
                year: self.year,
                month0: month0 + 1,
            },
        }
    }

    pub fn first_day(self) -> Result<NaiveDate, CalendarError> {
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, 1)
            .ok_or(CalendarError::InvalidYear(self.year))
    }

    /// Length of the month; works for the last representable month too.
    pub fn days_in_month(self) -> Result<u32, CalendarError> {
        self.first_day()?;
        Ok((28..=31)
            .rev()
            .find(|&day| NaiveDate::from_ymd_opt(self.year, self.month0 + 1, day).is_some())
            .unwrap_or(28))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    /// False for leading/trailing days borrowed from adjacent months.
    pub in_month: bool,
    pub is_today: bool,
    pub has_events: bool,
}

impl CalendarCell {
    /// Day-of-month label.
    pub fn day(&self) -> u32 {
        self.date.day()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub month: MonthCursor,
    pub cells: Vec<CalendarCell>,
}

impl MonthGrid {
    /// Cells grouped into six Sunday-first weeks.
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell]> {
        self.cells.chunks(WEEK_DAYS)
    }

    /// Resolves a cell click; other-month cells yield `None`.
    pub fn select<'t>(&self, index: usize, tasks: &'t [Task]) -> Option<Vec<&'t Task>> {
        let cell = self.cells.get(index)?;
        if !cell.in_month {
            return None;
        }
        Some(tasks_due_on(tasks, cell.date))
    }
}

/// Builds the 42-cell grid for `month`.
///
/// Leading cells repeat the tail of the previous month (as many as the
/// weekday of day 1, Sunday = 0); trailing cells run into the next month.
pub fn build_month_grid(
    month: MonthCursor,
    tasks: &[Task],
    today: NaiveDate,
) -> Result<MonthGrid, CalendarError> {
    let out_of_range = CalendarError::InvalidYear(month.year);
    let first = month.first_day()?;
    let leading = i64::from(first.weekday().num_days_from_sunday());
    let start = first
        .checked_sub_signed(Duration::days(leading))
        .ok_or_else(|| out_of_range.clone())?;
    let due_days: HashSet<NaiveDate> = tasks
        .iter()
        .filter_map(|task| task.deadline.map(|deadline| deadline.date()))
        .collect();

    let cells = (0..GRID_CELLS as i64)
        .map(|offset| {
            let date = start
                .checked_add_signed(Duration::days(offset))
                .ok_or_else(|| out_of_range.clone())?;
            let in_month = date.year() == month.year && date.month0() == month.month0;
            Ok(CalendarCell {
                date,
                in_month,
                is_today: in_month && date == today,
                has_events: in_month && due_days.contains(&date),
            })
        })
        .collect::<Result<Vec<_>, CalendarError>>()?;

    Ok(MonthGrid { month, cells })
}

/// Tasks whose deadline falls on `day`, in collection order.
pub fn tasks_due_on(tasks: &[Task], day: NaiveDate) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| task.deadline.is_some_and(|deadline| deadline.falls_on(day)))
        .collect()
}
