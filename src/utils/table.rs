//! Table rendering utilities for CLI outputs.
//!
//! Cells may contain user-entered page titles and URLs, so padding is
//! done on display width, not byte length.

use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

pub struct Column {
    pub header: String,
    pub width: usize,
    /// Wrap overlong cells onto continuation lines instead of truncating.
    pub wrap: bool,
}

impl Column {
    pub fn new(header: &str, width: usize) -> Self {
        Self {
            header: header.to_string(),
            width,
            wrap: false,
        }
    }

    pub fn wrapped(header: &str, width: usize) -> Self {
        Self {
            header: header.to_string(),
            width,
            wrap: true,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        // Header
        for col in &self.columns {
            out.push_str(&pad_display(&col.header, col.width));
            out.push(' ');
        }
        out.push('\n');

        for col in &self.columns {
            out.push_str(&"-".repeat(col.width));
            out.push(' ');
        }
        out.push('\n');

        // Rows. A wrapping cell may span several physical lines; the
        // other cells are blank on the continuation lines.
        for row in &self.rows {
            let mut cells: Vec<Vec<String>> = Vec::with_capacity(self.columns.len());
            let mut lines = 1;

            for (i, col) in self.columns.iter().enumerate() {
                let value = row.get(i).map(String::as_str).unwrap_or("");
                let cell = if col.wrap && value.width() > col.width {
                    wrap(value, col.width)
                        .into_iter()
                        .map(|c| c.into_owned())
                        .collect()
                } else {
                    vec![truncate_display(value, col.width)]
                };
                lines = lines.max(cell.len());
                cells.push(cell);
            }

            for line in 0..lines {
                for (i, col) in self.columns.iter().enumerate() {
                    let piece = cells[i].get(line).map(String::as_str).unwrap_or("");
                    out.push_str(&pad_display(piece, col.width));
                    out.push(' ');
                }
                out.push('\n');
            }
        }

        out
    }
}

/// Pads `s` to `width` display columns.
fn pad_display(s: &str, width: usize) -> String {
    let w = s.width();
    if w >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - w))
    }
}

/// Truncates `s` to `width` display columns, ending with an ellipsis.
fn truncate_display(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let cw = UnicodeWidthStr::width(ch.to_string().as_str());
        if used + cw + 1 > width {
            break;
        }
        out.push(ch);
        used += cw;
    }
    out.push('…');
    out
}
