// File: ./src/model/display.rs
use crate::model::item::ParsedTask;

/// `"{hours}h {mins}m"`, both parts always present (`0h 0m`).
pub fn format_minutes(total: u32) -> String {
    format!("{}h {}m", total / 60, total % 60)
}

pub trait TaskDisplay {
    fn due_date_string(&self) -> String;
    fn duration_label(&self) -> String;
}

impl TaskDisplay for ParsedTask {
    fn due_date_string(&self) -> String {
        self.due_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    /// Empty when there is no estimate or the estimate is zero.
    fn duration_label(&self) -> String {
        match self.minutes {
            Some(m) if m > 0 => format_minutes(m),
            _ => String::new(),
        }
    }
}
