use std::fmt;

use crate::domain::{Priority, TaskSet};

pub const JSON_FILE_NAME: &str = "tasks.json";
pub const CSV_FILE_NAME: &str = "tasks.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn default_file_name(self) -> &'static str {
        match self {
            ExportFormat::Json => JSON_FILE_NAME,
            ExportFormat::Csv => CSV_FILE_NAME,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn render(self, tasks: &TaskSet) -> Result<String, serde_json::Error> {
        match self {
            ExportFormat::Json => export_json(tasks),
            ExportFormat::Csv => Ok(export_csv(tasks)),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Pretty-printed JSON with the bucket names as keys.
pub fn export_json(tasks: &TaskSet) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(tasks)
}

/// Parses a document produced by [`export_json`]. Missing buckets default to
/// empty.
pub fn import_json(raw: &str) -> Result<TaskSet, serde_json::Error> {
    serde_json::from_str(raw)
}

/// `"Priority","Task"` header followed by one row per task, high to low,
/// every field quoted and lines joined by `\n` without a trailing newline.
pub fn export_csv(tasks: &TaskSet) -> String {
    let mut lines = vec![csv_row("Priority", "Task")];
    for priority in Priority::ALL {
        lines.extend(
            tasks
                .bucket(priority)
                .iter()
                .map(|task| csv_row(priority.csv_label(), task)),
        );
    }
    lines.join("\n")
}

fn csv_row(priority: &str, task: &str) -> String {
    format!("{},{}", quote(priority), quote(task))
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
#[path = "tests/export_tests.rs"]
mod tests;
