//! Output formatting for tasks: text table, detail view, and JSON.

use chrono::{DateTime, Utc};

use crate::types::Task;

use super::sort::{SortColumn, SortState};

/// Text shown in place of rows when nothing is displayed.
pub const EMPTY_STATE: &str = "No tasks found";

const MAX_CELL_WIDTH: usize = 40;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Date as shown in table cells.
pub fn format_date(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

fn truncate(s: &str, max_len: usize) -> String {
    // Newlines would break the row layout.
    let flat = s.replace(['\n', '\r'], " ");
    if flat.chars().count() <= max_len {
        flat
    } else {
        let mut out: String = flat.chars().take(max_len.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

fn cells(task: &Task) -> [String; 6] {
    [
        truncate(&task.title, MAX_CELL_WIDTH),
        truncate(&task.description, MAX_CELL_WIDTH),
        task.status.label().to_string(),
        task.priority.as_str().to_string(),
        format_date(&task.created_at),
        format_date(&task.updated_at),
    ]
}

fn headers(sort: &SortState) -> [String; 6] {
    SortColumn::ALL.map(|column| {
        if column == sort.column {
            format!("{} {}", column.header(), sort.direction.arrow())
        } else {
            column.header().to_string()
        }
    })
}

fn pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    format!("{}{}", s, " ".repeat(width.saturating_sub(len)))
}

/// Render rows as an aligned text table with a sort indicator on the active
/// column. An empty `rows` renders a single "No tasks found" row.
pub fn format_task_table(rows: &[&Task], sort: &SortState) -> String {
    let headers = headers(sort);
    let body: Vec<[String; 6]> = rows.iter().map(|t| cells(t)).collect();

    let mut widths = headers.clone().map(|h| h.chars().count());
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render_row = |row: &[String; 6]| -> String {
        row.iter()
            .zip(widths.iter())
            .map(|(cell, width)| pad(cell, *width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&render_row(&headers));
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');

    if body.is_empty() {
        out.push_str(EMPTY_STATE);
        out.push('\n');
        return out;
    }

    for row in &body {
        out.push_str(&render_row(row));
        out.push('\n');
    }
    out
}

/// Format a single task for the detail view.
pub fn format_task_detail(task: &Task) -> String {
    let mut md = String::new();

    md.push_str(&format!("## Task: {}\n", task.title));
    md.push_str(&format!("- **id**: `{}`\n", task.id));
    md.push_str(&format!("- **status**: {}\n", task.status));
    md.push_str(&format!("- **priority**: {}\n", task.priority));
    md.push_str(&format!("- **created**: {}\n", task.created_at.to_rfc3339()));
    md.push_str(&format!("- **updated**: {}\n", task.updated_at.to_rfc3339()));

    if !task.description.is_empty() {
        md.push_str("\n### Description\n");
        md.push_str(&task.description);
        md.push('\n');
    }

    md
}

/// Pretty-printed JSON for any serializable value.
pub fn format_json<T: serde::Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}
