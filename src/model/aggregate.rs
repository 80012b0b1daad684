// File: ./src/model/aggregate.rs
// Pure reductions over parsed tasks: active subset, totals and the two views.
use crate::model::display::TaskDisplay;
use crate::model::item::ParsedTask;
use serde::Serialize;

/// One row of the due-soon table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DueSoonRow {
    pub text: String,
    pub due_date: String,
    pub time_estimate: String,
}

impl DueSoonRow {
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.text.clone(),
            self.due_date.clone(),
            self.time_estimate.clone(),
        ]
    }
}

pub fn active_tasks(tasks: &[ParsedTask]) -> Vec<&ParsedTask> {
    tasks.iter().filter(|t| t.is_active()).collect()
}

/// Sum of estimates over the active subset; missing estimates count as zero.
pub fn total_minutes(tasks: &[ParsedTask]) -> u32 {
    active_tasks(tasks)
        .iter()
        .map(|t| t.minutes.unwrap_or(0))
        .fold(0u32, u32::saturating_add)
}

pub fn due_soon_view(tasks: &[ParsedTask]) -> Vec<DueSoonRow> {
    let mut upcoming: Vec<&ParsedTask> = tasks
        .iter()
        .filter(|t| t.due_date.is_some() && !t.completed && !t.will_not_do)
        .collect();
    // `sort_by_key` is stable: equal dates keep input order.
    upcoming.sort_by_key(|t| t.due_date);

    upcoming
        .into_iter()
        .map(|t| DueSoonRow {
            text: t.text.clone(),
            due_date: t.due_date_string(),
            time_estimate: t.duration_label(),
        })
        .collect()
}

/// Texts of open waiting tasks. Will-not-do tasks are kept.
pub fn waiting_view(tasks: &[ParsedTask]) -> Vec<String> {
    tasks
        .iter()
        .filter(|t| t.is_waiting && !t.completed)
        .map(|t| t.text.clone())
        .collect()
}
