// File: ./src/vault.rs
//! Read-only access to the notes of a Markdown vault.
//!
//! `NoteStore` is the seam between the digest and wherever notes come from.
//! `FsVault` reads files under a root directory and pulls out checkbox list
//! items. `MemoryVault` keeps pages in a map and is handy for tests.
use crate::model::RawTask;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A note and the tasks it contains, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub path: String,
    pub tasks: Vec<RawTask>,
}

pub trait NoteStore {
    /// Looks a note up by its vault-relative path. `None` when it does not exist.
    fn get_page(&self, identifier: &str) -> Option<Page>;

    /// Tasks of a note, or an empty list when the note is missing.
    fn tasks_of(&self, identifier: &str) -> Vec<RawTask> {
        self.get_page(identifier)
            .map(|p| p.tasks)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl NoteStore for FsVault {
    fn get_page(&self, identifier: &str) -> Option<Page> {
        let path = self.root.join(identifier);
        match fs::read(&path) {
            Ok(bytes) => {
                // Stray non-UTF-8 bytes should not cost the whole note its tasks.
                let content = String::from_utf8_lossy(&bytes);
                let tasks = extract_tasks(&content);
                log::debug!("Read {} task(s) from {}", tasks.len(), path.display());
                Some(Page {
                    path: identifier.to_string(),
                    tasks,
                })
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("Note not found: {}", path.display());
                None
            }
            Err(e) => {
                log::warn!("Failed to read note '{}': {}", path.display(), e);
                None
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryVault {
    pages: HashMap<String, Page>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, identifier: &str, tasks: Vec<RawTask>) {
        self.pages.insert(
            identifier.to_string(),
            Page {
                path: identifier.to_string(),
                tasks,
            },
        );
    }

    /// Adds a page from Markdown source, extracting tasks the same way `FsVault` does.
    pub fn insert_markdown(&mut self, identifier: &str, content: &str) {
        self.insert(identifier, extract_tasks(content));
    }
}

impl NoteStore for MemoryVault {
    fn get_page(&self, identifier: &str) -> Option<Page> {
        self.pages.get(identifier).cloned()
    }
}

/// Strips a list marker (`-`, `*`, `+`, `1.`, `1)`) and the space after it.
fn strip_list_marker(line: &str) -> Option<&str> {
    if let Some(rest) = line
        .strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .or_else(|| line.strip_prefix("+ "))
    {
        return Some(rest);
    }
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    line[digits..]
        .strip_prefix(". ")
        .or_else(|| line[digits..].strip_prefix(") "))
}

/// Parses one line as a checkbox item: `<marker> [c] text`.
fn parse_task_line(line: &str) -> Option<(char, &str)> {
    let item = strip_list_marker(line.trim_start())?.trim_start();
    let inner = item.strip_prefix('[')?;
    let mut chars = inner.chars();
    let status = chars.next()?;
    let rest = chars.as_str().strip_prefix(']')?;
    if !(rest.is_empty() || rest.starts_with(char::is_whitespace)) {
        return None;
    }
    Some((status, rest.trim()))
}

/// A fence marker line: the fence character, the length of its run, and
/// whether anything but whitespace follows the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fence {
    ch: char,
    len: usize,
    bare: bool,
}

fn fence_of(line: &str) -> Option<Fence> {
    let t = line.trim_start();
    let ch = t.chars().next().filter(|c| matches!(*c, '`' | '~'))?;
    let len = t.chars().take_while(|c| *c == ch).count();
    if len < 3 {
        return None;
    }
    let bare = t[len..].trim().is_empty();
    Some(Fence { ch, len, bare })
}

impl Fence {
    /// A fence only closes on a bare run of its own character, at least as long.
    fn is_closed_by(&self, other: &Fence) -> bool {
        other.ch == self.ch && other.len >= self.len && other.bare
    }
}

/// Extracts every checkbox item outside fenced code blocks.
pub fn extract_tasks(content: &str) -> Vec<RawTask> {
    let mut tasks = Vec::new();
    let mut open_fence: Option<Fence> = None;

    for (idx, line) in content.lines().enumerate() {
        let fence = fence_of(line);
        match (open_fence, fence) {
            (Some(open), Some(f)) if open.is_closed_by(&f) => {
                open_fence = None;
                continue;
            }
            (Some(_), _) => continue,
            (None, Some(f)) => {
                open_fence = Some(f);
                continue;
            }
            (None, None) => {}
        }
        if let Some((status, text)) = parse_task_line(line) {
            let completed = matches!(status, 'x' | 'X');
            tasks.push(RawTask::new(text, completed, status).with_line(idx + 1));
        }
    }
    tasks
}
