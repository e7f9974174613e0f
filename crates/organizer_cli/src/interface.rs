use anyhow::{bail, Context, Result};
use chrono::{Datelike, Local, Timelike};
use organizer_core::query::dashboard::{daily_achievement, focus_candidates, summarize, AchievementTier};
use organizer_core::query::note_query::search_notes;
use organizer_core::{
    build_month_grid, parse_tags, query_tasks, tasks_due_on, Deadline, FocusTimer,
    KeyValueRepository, MonthCursor, NewNote, NewTask, Priority, RecordId, RecordStore, Task,
    TaskPatch, TaskQuery, TaskStatus, ViewMode,
};

pub fn summary<R: KeyValueRepository>(store: &RecordStore<R>) -> Result<()> {
    let now = Local::now();
    println!("{}", today_label());
    let counters = summarize(store.tasks(), now.naive_local());
    println!("pending: {}", counters.pending);
    println!("urgent:  {}", counters.urgent);
    println!("today:   {}", counters.due_today);

    let achievement = daily_achievement(store.tasks(), now.date_naive());
    match achievement.tier() {
        AchievementTier::None => {}
        AchievementTier::One => println!("You completed 1 task today!"),
        AchievementTier::Few => {
            println!("You completed {} tasks today!", achievement.completed_today)
        }
        AchievementTier::Many => println!(
            "Amazing! You completed {} tasks today!",
            achievement.completed_today
        ),
    }

    let night = store.preferences().resolve_night_mode(now.hour())?;
    println!("night mode: {}", if night { "on" } else { "off" });
    Ok(())
}

pub fn list_tasks<R: KeyValueRepository>(store: &RecordStore<R>, query: TaskQuery) -> Result<()> {
    let today = Local::now().date_naive();
    let tasks = query_tasks(store.tasks(), &query, today);
    if tasks.is_empty() {
        match query.view {
            ViewMode::Today => println!("No tasks due today."),
            ViewMode::All => println!("No tasks."),
        }
        return Ok(());
    }
    for task in &tasks {
        print_task(task);
    }
    Ok(())
}

pub fn add_task<R: KeyValueRepository>(store: &mut RecordStore<R>, fields: NewTask) -> Result<()> {
    let task = store.create_task(fields)?;
    println!("added task {}", task.id);
    Ok(())
}

pub fn edit_task<R: KeyValueRepository>(
    store: &mut RecordStore<R>,
    id: RecordId,
    patch: TaskPatch,
) -> Result<()> {
    let task = store.update_task(id, patch)?;
    print_task(&task);
    Ok(())
}

pub fn cycle_task<R: KeyValueRepository>(store: &mut RecordStore<R>, id: RecordId) -> Result<()> {
    let status = store.cycle_task_status(id)?;
    println!("task {id} is now {status}");
    Ok(())
}

pub fn remove_task<R: KeyValueRepository>(
    store: &mut RecordStore<R>,
    id: RecordId,
    confirmed: bool,
) -> Result<()> {
    if !confirmed {
        bail!("refusing to delete task {id} without --yes");
    }
    store.delete_task(id)?;
    println!("deleted task {id}");
    Ok(())
}

pub fn calendar<R: KeyValueRepository>(
    store: &RecordStore<R>,
    year: Option<i32>,
    month: Option<u32>,
) -> Result<()> {
    let today = Local::now().date_naive();
    let current = MonthCursor::containing(today);
    let month0 = match month {
        Some(0) => bail!("month must be between 1 and 12"),
        Some(value) => value - 1,
        None => current.month0,
    };
    let cursor = MonthCursor::new(year.unwrap_or(current.year), month0)?;
    let grid = build_month_grid(cursor, store.tasks(), today)?;

    println!("{}-{:02}", cursor.year, cursor.month0 + 1);
    println!(" Su  Mo  Tu  We  Th  Fr  Sa");
    for week in grid.weeks() {
        let line: Vec<String> = week
            .iter()
            .map(|cell| {
                let marker = match (cell.in_month, cell.is_today, cell.has_events) {
                    (false, _, _) => '.',
                    (true, true, _) => '>',
                    (true, false, true) => '*',
                    (true, false, false) => ' ',
                };
                format!("{marker}{:>2}", cell.day())
            })
            .collect();
        println!("{}", line.join(" "));
    }
    Ok(())
}

pub fn day<R: KeyValueRepository>(store: &RecordStore<R>, date: chrono::NaiveDate) -> Result<()> {
    let due = tasks_due_on(store.tasks(), date);
    if due.is_empty() {
        println!("Nothing due on {date}.");
    }
    for task in due {
        print_task(task);
    }
    Ok(())
}

pub fn list_notes<R: KeyValueRepository>(store: &RecordStore<R>, search: Option<String>) -> Result<()> {
    let notes = search_notes(store.notes(), search.as_deref().unwrap_or(""));
    if notes.is_empty() {
        println!("No notes.");
    }
    for note in notes {
        println!("[{}] {} ({})", note.id, note.title, note.category);
        println!("    {}", note.preview());
        if !note.tags.is_empty() {
            println!("    #{}", note.tags.join(" #"));
        }
    }
    Ok(())
}

pub fn add_note<R: KeyValueRepository>(
    store: &mut RecordStore<R>,
    title: String,
    content: String,
    tags: &str,
    category: Option<String>,
) -> Result<()> {
    let note = store.create_note(NewNote {
        title,
        content,
        tags: parse_tags(tags),
        category,
    })?;
    println!("added note {}", note.id);
    Ok(())
}

pub fn remove_note<R: KeyValueRepository>(
    store: &mut RecordStore<R>,
    id: RecordId,
    confirmed: bool,
) -> Result<()> {
    if !confirmed {
        bail!("refusing to delete note {id} without --yes");
    }
    store.delete_note(id)?;
    println!("deleted note {id}");
    Ok(())
}

pub fn habits<R: KeyValueRepository>(store: &RecordStore<R>) -> Result<()> {
    let today = Local::now().date_naive();
    for habit in store.habits() {
        let mark = if store.is_habit_marked(habit.id, today)? {
            "x"
        } else {
            " "
        };
        println!(
            "[{mark}] {:>14} {} {}/{} ({:.0}%)",
            habit.id,
            habit.name,
            habit.current,
            habit.target,
            habit.progress_percent()
        );
    }
    if let Some(goals) = store.preferences().weekly_goals()? {
        println!("weekly goals: {goals}");
    }
    Ok(())
}

pub fn toggle_habit<R: KeyValueRepository>(store: &mut RecordStore<R>, id: RecordId) -> Result<()> {
    let toggle = store.toggle_habit_today(id)?;
    let habit = store
        .habit(id)
        .with_context(|| format!("habit {id} vanished after toggle"))?;
    println!(
        "{}: {} ({}/{})",
        habit.name,
        if toggle.marked { "done today" } else { "unmarked" },
        toggle.current,
        habit.target
    );
    Ok(())
}

pub fn add_habit<R: KeyValueRepository>(store: &mut RecordStore<R>, name: String) -> Result<()> {
    let habit = store.add_custom_habit(name)?;
    println!("added habit {}", habit.id);
    Ok(())
}

pub fn goals<R: KeyValueRepository>(store: &RecordStore<R>, text: Option<String>) -> Result<()> {
    let prefs = store.preferences();
    match text {
        Some(text) => prefs.set_weekly_goals(&text)?,
        None => match prefs.weekly_goals()? {
            Some(goals) => println!("{goals}"),
            None => println!("No weekly goals yet."),
        },
    }
    Ok(())
}

pub fn night_mode<R: KeyValueRepository>(store: &RecordStore<R>, value: Option<bool>) -> Result<()> {
    let prefs = store.preferences();
    if let Some(enabled) = value {
        prefs.set_night_mode(enabled)?;
    }
    println!("night mode: {}", if prefs.night_mode()? { "on" } else { "off" });
    Ok(())
}

pub fn focus<R: KeyValueRepository>(store: &RecordStore<R>, minutes: u32) -> Result<()> {
    let timer = FocusTimer::new(minutes);
    println!("{}", timer.display());
    for task in focus_candidates(store.tasks()) {
        println!("  [{}] {}", task.id, task.title);
    }
    Ok(())
}

fn print_task(task: &Task) {
    let status_icon = match task.status {
        TaskStatus::Completed => '✓',
        TaskStatus::InProgress => '⟳',
        TaskStatus::Pending => '○',
    };
    let deadline = task
        .deadline
        .as_ref()
        .map(Deadline::to_string)
        .unwrap_or_else(|| "no date".to_string());
    let priority = match task.priority {
        Priority::High => "high",
        Priority::Medium => "med",
        Priority::Low => "low",
    };
    println!(
        "{status_icon} [{}] {} ({priority}, {}, {deadline})",
        task.id, task.title, task.category
    );
    if let Some(description) = task.description.as_deref().filter(|d| !d.is_empty()) {
        println!("    {description}");
    }
}

fn today_label() -> String {
    let today = Local::now().date_naive();
    format!("{} {}", today.weekday(), today)
}
