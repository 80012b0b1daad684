// File: ./src/render.rs
//! Output side of the digest: headers, a table and a list.
//!
//! Renderers write blocks separated by a blank line. Column widths are
//! measured with `unicode-width` so emoji and wide characters line up.
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

pub trait Renderer {
    fn header(&mut self, level: usize, text: &str) -> io::Result<()>;
    fn table(&mut self, headers: &[&str], rows: &[Vec<String>]) -> io::Result<()>;
    fn list(&mut self, items: &[String]) -> io::Result<()>;
}

fn column_widths(headers: &[&str], rows: &[Vec<String>], min: usize) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .map(|c| c.width())
                .chain(std::iter::once(h.width()))
                .max()
                .unwrap_or(0)
                .max(min)
        })
        .collect()
}

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(cell.width());
    format!("{}{}", cell, " ".repeat(fill))
}

/// GitHub-flavoured Markdown, the same shape a vault query would render.
pub struct MarkdownRenderer<W: Write> {
    out: W,
}

impl<W: Write> MarkdownRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn escape_cell(cell: &str) -> String {
        cell.replace('|', "\\|")
    }

    fn write_row(&mut self, cells: &[String], widths: &[usize]) -> io::Result<()> {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(c, w)| pad(c, *w))
            .collect();
        writeln!(self.out, "| {} |", padded.join(" | "))
    }
}

impl<W: Write> Renderer for MarkdownRenderer<W> {
    fn header(&mut self, level: usize, text: &str) -> io::Result<()> {
        writeln!(self.out, "{} {}", "#".repeat(level.clamp(1, 6)), text)?;
        writeln!(self.out)
    }

    fn table(&mut self, headers: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
        let rows: Vec<Vec<String>> = rows
            .iter()
            .map(|r| r.iter().map(|c| Self::escape_cell(c)).collect())
            .collect();
        let widths = column_widths(headers, &rows, 3);

        let head: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        self.write_row(&head, &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        self.write_row(&rule, &widths)?;
        for row in &rows {
            self.write_row(row, &widths)?;
        }
        writeln!(self.out)
    }

    fn list(&mut self, items: &[String]) -> io::Result<()> {
        if items.is_empty() {
            return Ok(());
        }
        for item in items {
            writeln!(self.out, "- {}", item)?;
        }
        writeln!(self.out)
    }
}

/// Plain terminal text: underlined headers and space-aligned columns.
pub struct PlainRenderer<W: Write> {
    out: W,
}

impl<W: Write> PlainRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for PlainRenderer<W> {
    fn header(&mut self, level: usize, text: &str) -> io::Result<()> {
        let underline = if level <= 1 { "=" } else { "-" };
        writeln!(self.out, "{}", text)?;
        writeln!(self.out, "{}", underline.repeat(text.width()))?;
        writeln!(self.out)
    }

    fn table(&mut self, headers: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
        if rows.is_empty() {
            writeln!(self.out, "(none)")?;
            return writeln!(self.out);
        }
        let widths = column_widths(headers, rows, 0);
        let line = |cells: Vec<String>| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(c, w)| pad(c, *w))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };
        writeln!(
            self.out,
            "{}",
            line(headers.iter().map(|h| h.to_string()).collect())
        )?;
        for row in rows {
            writeln!(self.out, "{}", line(row.clone()))?;
        }
        writeln!(self.out)
    }

    fn list(&mut self, items: &[String]) -> io::Result<()> {
        if items.is_empty() {
            writeln!(self.out, "(none)")?;
        }
        for item in items {
            writeln!(self.out, "  • {}", item)?;
        }
        writeln!(self.out)
    }
}
