//! Dashboard counters, daily achievements and focus candidates.

use crate::model::task::{Priority, Task};
use chrono::{Duration, NaiveDate, NaiveDateTime};

const URGENT_WINDOW_DAYS: i64 = 7;
const FEW_ACHIEVEMENTS_BELOW: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    /// Tasks not yet completed.
    pub pending: usize,
    /// High-priority open tasks due within the next seven days, overdue included.
    pub urgent: usize,
    /// Tasks due today regardless of status.
    pub due_today: usize,
}

pub fn summarize(tasks: &[Task], now: NaiveDateTime) -> DashboardSummary {
    let horizon = now + Duration::days(URGENT_WINDOW_DAYS);
    let today = now.date();
    DashboardSummary {
        pending: tasks.iter().filter(|task| !task.is_completed()).count(),
        urgent: tasks
            .iter()
            .filter(|task| {
                task.priority == Priority::High
                    && !task.is_completed()
                    && task.deadline.is_some_and(|d| d.instant() <= horizon)
            })
            .count(),
        due_today: count_due_on(tasks, today),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AchievementTier {
    None,
    One,
    /// Two to four completed tasks.
    Few,
    Many,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyAchievement {
    pub completed_today: usize,
    pub total_today: usize,
}

impl DailyAchievement {
    pub fn tier(&self) -> AchievementTier {
        match self.completed_today {
            0 => AchievementTier::None,
            1 => AchievementTier::One,
            n if n < FEW_ACHIEVEMENTS_BELOW => AchievementTier::Few,
            _ => AchievementTier::Many,
        }
    }
}

/// Completion tally over tasks due on `today`.
pub fn daily_achievement(tasks: &[Task], today: NaiveDate) -> DailyAchievement {
    let due: Vec<&Task> = tasks
        .iter()
        .filter(|task| task.deadline.is_some_and(|d| d.falls_on(today)))
        .collect();
    DailyAchievement {
        completed_today: due.iter().filter(|task| task.is_completed()).count(),
        total_today: due.len(),
    }
}

/// Open tasks offered by focus mode, in collection order.
pub fn focus_candidates(tasks: &[Task]) -> Vec<&Task> {
    tasks.iter().filter(|task| !task.is_completed()).collect()
}

fn count_due_on(tasks: &[Task], day: NaiveDate) -> usize {
    tasks
        .iter()
        .filter(|task| task.deadline.is_some_and(|d| d.falls_on(day)))
        .count()
}

#[cfg(test)]
mod tests {
    use super::{AchievementTier, DailyAchievement};

    #[test]
    fn tiers_follow_completed_count() {
        let tier = |completed_today| {
            DailyAchievement {
                completed_today,
                total_today: 10,
            }
            .tier()
        };
        assert_eq!(tier(0), AchievementTier::None);
        assert_eq!(tier(1), AchievementTier::One);
        assert_eq!(tier(4), AchievementTier::Few);
        assert_eq!(tier(5), AchievementTier::Many);
    }
}
