// File: ./src/digest.rs
// Selects tasks from the daily and backlog notes and assembles the report.
//
// "Today" is always passed in; nothing here reads the clock.
use crate::config::Config;
use crate::model::aggregate::{self, DueSoonRow};
use crate::model::item::{ParsedTask, RawTask};
use crate::model::parser::{extract_due_date, has_tag, parse_with_tag};
use crate::model::format_minutes;
use crate::render::Renderer;
use crate::vault::NoteStore;
use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::io;

pub const DUE_SOON_COLUMNS: [&str; 3] = ["Task", "Due Date", "Time Est."];

/// Vault-relative path of the daily note, e.g. `discord/2024-Jan-17 (Wednesday).md`.
pub fn today_file_name(folder: &str, date: NaiveDate) -> String {
    format!("{}/{}.md", folder, date.format("%Y-%b-%d (%A)"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestOptions {
    pub daily_folder: String,
    pub backlog_path: String,
    pub work_tag: String,
    pub personal_tag: String,
    pub waiting_tag: String,
    pub due_soon_days: u32,
}

impl Default for DigestOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for DigestOptions {
    fn from(config: &Config) -> Self {
        Self {
            daily_folder: config.daily_folder.clone(),
            backlog_path: config.backlog_path.clone(),
            work_tag: config.work_tag.clone(),
            personal_tag: config.personal_tag.clone(),
            waiting_tag: config.waiting_tag.clone(),
            due_soon_days: config.due_soon_days,
        }
    }
}

pub fn filter_by_tag(tasks: &[RawTask], tag: &str) -> Vec<RawTask> {
    tasks
        .iter()
        .filter(|t| has_tag(&t.text, tag))
        .cloned()
        .collect()
}

/// Last date inside the due-soon window.
pub fn due_soon_cutoff(today: NaiveDate, days: u32) -> NaiveDate {
    today
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}

/// Open task whose marker date is on or before `cutoff`. Overdue tasks qualify.
pub fn is_due_soon(task: &RawTask, cutoff: NaiveDate) -> bool {
    !task.completed && extract_due_date(&task.text).is_some_and(|d| d <= cutoff)
}

pub fn select_due_soon(tasks: &[RawTask], today: NaiveDate, days: u32) -> Vec<RawTask> {
    let cutoff = due_soon_cutoff(today, days);
    tasks
        .iter()
        .filter(|t| is_due_soon(t, cutoff))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Digest {
    pub date: NaiveDate,
    pub daily_note: String,
    pub work_minutes: u32,
    pub personal_minutes: u32,
    pub due_soon: Vec<DueSoonRow>,
    pub waiting: Vec<String>,
}

impl Digest {
    pub fn work_header(&self) -> String {
        format!("🧠 Work: {}", format_minutes(self.work_minutes))
    }

    pub fn personal_header(&self) -> String {
        format!("🧠 Personal: {}", format_minutes(self.personal_minutes))
    }
}

fn parse_all(tasks: &[RawTask], waiting_tag: &str) -> Vec<ParsedTask> {
    tasks.iter().map(|t| parse_with_tag(t, waiting_tag)).collect()
}

pub fn build_digest(store: &dyn NoteStore, opts: &DigestOptions, today: NaiveDate) -> Digest {
    let daily_note = today_file_name(&opts.daily_folder, today);
    let today_tasks = store.tasks_of(&daily_note);
    if today_tasks.is_empty() {
        log::debug!("No tasks in daily note {}", daily_note);
    }

    let work = filter_by_tag(&today_tasks, &opts.work_tag);
    let personal = filter_by_tag(&today_tasks, &opts.personal_tag);
    log::info!("Found work tasks: {}", work.len());
    log::info!("Found personal tasks: {}", personal.len());

    let backlog = store.tasks_of(&opts.backlog_path);
    let waiting = filter_by_tag(&backlog, &opts.waiting_tag);
    log::info!("Found waiting tasks: {}", waiting.len());

    let due_soon = select_due_soon(&backlog, today, opts.due_soon_days);
    log::info!("Found due soon tasks: {}", due_soon.len());

    let work = parse_all(&work, &opts.waiting_tag);
    let personal = parse_all(&personal, &opts.waiting_tag);
    let waiting = parse_all(&waiting, &opts.waiting_tag);
    let due_soon = parse_all(&due_soon, &opts.waiting_tag);

    Digest {
        date: today,
        daily_note,
        work_minutes: aggregate::total_minutes(&work),
        personal_minutes: aggregate::total_minutes(&personal),
        due_soon: aggregate::due_soon_view(&due_soon),
        waiting: aggregate::waiting_view(&waiting),
    }
}

pub fn render_digest(digest: &Digest, renderer: &mut dyn Renderer) -> io::Result<()> {
    renderer.header(1, &digest.work_header())?;
    renderer.header(1, &digest.personal_header())?;

    renderer.header(2, "📅 Due Soon")?;
    let rows: Vec<Vec<String>> = digest.due_soon.iter().map(DueSoonRow::cells).collect();
    renderer.table(&DUE_SOON_COLUMNS, &rows)?;

    renderer.header(2, "⏳ Waiting On")?;
    renderer.list(&digest.waiting)
}
