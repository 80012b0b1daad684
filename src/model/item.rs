// File: ./src/model/item.rs
use chrono::NaiveDate;

/// Status character that marks a task as "will not do" (`- [-] ...`).
pub const WILL_NOT_DO_STATUS: char = '-';

/// A task item as it appears in a note, before any metadata is extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTask {
    pub text: String,
    pub completed: bool,
    /// The character between the checkbox brackets (`' '`, `'x'`, `'-'`, ...).
    pub status: char,
    /// 1-based line in the source note. Diagnostics only.
    pub line: usize,
}

impl RawTask {
    pub fn new(text: impl Into<String>, completed: bool, status: char) -> Self {
        Self {
            text: text.into(),
            completed,
            status,
            line: 0,
        }
    }

    /// An open task (`- [ ] text`).
    pub fn open(text: impl Into<String>) -> Self {
        Self::new(text, false, ' ')
    }

    /// A checked task (`- [x] text`).
    pub fn done(text: impl Into<String>) -> Self {
        Self::new(text, true, 'x')
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTask {
    /// Display text with the `⏲` duration and `📅` date markers removed.
    pub text: String,
    pub minutes: Option<u32>,
    pub due_date: Option<NaiveDate>,
    pub is_waiting: bool,
    pub completed: bool,
    pub will_not_do: bool,
}

impl ParsedTask {
    /// Neither waiting, completed nor marked will-not-do.
    pub fn is_active(&self) -> bool {
        !self.is_waiting && !self.completed && !self.will_not_do
    }
}
