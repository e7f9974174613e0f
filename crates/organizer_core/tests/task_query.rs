use chrono::{NaiveDate, Utc};
use organizer_core::query::dashboard::{daily_achievement, focus_candidates, summarize, AchievementTier};
use organizer_core::query::task_query::sort_tasks;
use organizer_core::{query_tasks, Filter, Priority, Task, TaskQuery, TaskStatus, ViewMode};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 10).unwrap()
}

fn task(id: i64, priority: Priority, deadline: Option<&str>) -> Task {
    Task {
        id,
        title: format!("task {id}"),
        description: None,
        deadline: deadline.map(|text| text.parse().unwrap()),
        priority,
        category: "study".to_string(),
        status: TaskStatus::Pending,
        created_at: Utc::now(),
    }
}

fn ids(tasks: &[Task]) -> Vec<i64> {
    tasks.iter().map(|task| task.id).collect()
}

#[test]
fn sort_orders_priority_then_deadline_with_undated_last() {
    let tasks = vec![
        task(1, Priority::High, Some("2024-12-10")),
        task(2, Priority::High, None),
        task(3, Priority::Low, Some("2024-12-01")),
    ];
    let sorted = query_tasks(&tasks, &TaskQuery::all(), today());
    assert_eq!(ids(&sorted), vec![1, 2, 3]);

    let shuffled = vec![tasks[2].clone(), tasks[1].clone(), tasks[0].clone()];
    let sorted = query_tasks(&shuffled, &TaskQuery::all(), today());
    assert_eq!(ids(&sorted), vec![1, 2, 3]);
}

#[test]
fn ties_keep_collection_order_and_sorting_is_idempotent() {
    let tasks = vec![
        task(1, Priority::Medium, None),
        task(2, Priority::Medium, Some("2024-12-20")),
        task(3, Priority::Medium, None),
        task(4, Priority::Medium, Some("2024-12-11T09:00")),
        task(5, Priority::Medium, Some("2024-12-11")),
    ];
    let once = query_tasks(&tasks, &TaskQuery::all(), today());
    assert_eq!(ids(&once), vec![5, 4, 2, 1, 3]);

    let mut twice = once.clone();
    sort_tasks(&mut twice);
    assert_eq!(once, twice);
    assert_eq!(ids(&tasks), vec![1, 2, 3, 4, 5]);
}

#[test]
fn today_view_matches_date_regardless_of_time() {
    let tasks = vec![
        task(1, Priority::Low, Some("2024-12-10T23:30")),
        task(2, Priority::Low, Some("2024-12-11T00:00")),
        task(3, Priority::Low, None),
        task(4, Priority::High, Some("2024-12-10")),
    ];
    let query = TaskQuery::default();
    assert_eq!(query.view, ViewMode::Today);

    let visible = query_tasks(&tasks, &query, today());
    assert_eq!(ids(&visible), vec![4, 1]);
}

#[test]
fn filters_narrow_by_exact_match() {
    let mut tasks = vec![
        task(1, Priority::High, None),
        task(2, Priority::High, None),
        task(3, Priority::Low, None),
    ];
    tasks[1].category = "lab".to_string();
    tasks[0].status = TaskStatus::Completed;

    let by_priority = TaskQuery {
        priority: Filter::Only(Priority::High),
        ..TaskQuery::all()
    };
    assert_eq!(ids(&query_tasks(&tasks, &by_priority, today())), vec![1, 2]);

    let by_category_and_status = TaskQuery {
        category: Filter::Only("study".to_string()),
        status: Filter::Only(TaskStatus::Pending),
        ..TaskQuery::all()
    };
    assert_eq!(
        ids(&query_tasks(&tasks, &by_category_and_status, today())),
        vec![3]
    );
}

#[test]
fn dashboard_counts_pending_urgent_and_due_today() {
    let mut tasks = vec![
        task(1, Priority::High, Some("2024-12-15")),
        task(2, Priority::High, Some("2024-12-30")),
        task(3, Priority::High, Some("2024-12-10T18:00")),
        task(4, Priority::Low, Some("2024-12-10")),
        task(5, Priority::High, None),
    ];
    tasks[3].status = TaskStatus::Completed;

    let now = today().and_hms_opt(9, 0, 0).unwrap();
    let summary = summarize(&tasks, now);
    assert_eq!(summary.pending, 4);
    assert_eq!(summary.urgent, 2);
    assert_eq!(summary.due_today, 2);

    let achievement = daily_achievement(&tasks, today());
    assert_eq!(achievement.total_today, 2);
    assert_eq!(achievement.completed_today, 1);
    assert_eq!(achievement.tier(), AchievementTier::One);

    let focus: Vec<i64> = focus_candidates(&tasks).iter().map(|t| t.id).collect();
    assert_eq!(focus, vec![1, 2, 3, 5]);
}
