use crate::model::Task;
use crate::task_store::TaskStats;
use colored::Colorize;
use std::io::{self, Write};
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Plain { color: bool },
    Json,
}

/// Writes command results to an injected sink instead of the process stdout.
pub struct Console<W: Write> {
    out: W,
    mode: OutputMode,
}

impl<W: Write> Console<W> {
    pub fn new(out: W, mode: OutputMode) -> Self {
        Self { out, mode }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn task_added(&mut self, task: &Task) -> io::Result<()> {
        self.task_event("added", task)
    }

    pub fn task_completed(&mut self, task: &Task) -> io::Result<()> {
        self.task_event("completed", task)
    }

    pub fn task_deleted(&mut self, task: &Task) -> io::Result<()> {
        self.task_event("deleted", task)
    }

    pub fn task_not_found(&mut self, id: u64) -> io::Result<()> {
        match self.mode {
            OutputMode::Json => {
                let payload = serde_json::json!({ "id": id, "status": "not_found" });
                writeln!(self.out, "{payload}")
            }
            OutputMode::Plain { .. } => writeln!(self.out, "Task not found."),
        }
    }

    /// User-facing notice for input the command could not act on.
    pub fn notice(&mut self, message: &str) -> io::Result<()> {
        match self.mode {
            OutputMode::Json => {
                let payload = serde_json::json!({ "error": "invalid_input", "message": message });
                writeln!(self.out, "{payload}")
            }
            OutputMode::Plain { .. } => writeln!(self.out, "{message}"),
        }
    }

    pub fn task_list(&mut self, tasks: &[&Task]) -> io::Result<()> {
        let color = match self.mode {
            OutputMode::Json => {
                let payload = serde_json::to_string(tasks).map_err(io::Error::other)?;
                return writeln!(self.out, "{payload}");
            }
            OutputMode::Plain { color } => color,
        };

        if tasks.is_empty() {
            return writeln!(self.out, "No tasks found.");
        }

        let offset = local_offset();
        writeln!(self.out, "\n=== Task List ===\n")?;
        for task in tasks {
            writeln!(
                self.out,
                "{} {} {}",
                status_mark(task, color),
                priority_tag(task, color),
                task.description
            )?;
            writeln!(
                self.out,
                "  ID: {} | Created: {}\n",
                task.id,
                display_date(task.created_at, offset)
            )?;
        }
        Ok(())
    }

    pub fn stats(&mut self, stats: &TaskStats) -> io::Result<()> {
        if self.mode == OutputMode::Json {
            let payload = serde_json::json!({
                "total": stats.total,
                "completed": stats.completed,
                "pending": stats.pending,
                "completionRate": stats.rate_label(),
            });
            return writeln!(self.out, "{payload}");
        }

        writeln!(self.out, "\n=== Task Statistics ===")?;
        writeln!(self.out, "Total Tasks: {}", stats.total)?;
        writeln!(self.out, "Completed: {}", stats.completed)?;
        writeln!(self.out, "Pending: {}", stats.pending)?;
        writeln!(self.out, "Completion Rate: {}\n", stats.rate_label())
    }

    fn task_event(&mut self, verb: &str, task: &Task) -> io::Result<()> {
        match self.mode {
            OutputMode::Json => {
                let payload = serde_json::to_string(task).map_err(io::Error::other)?;
                writeln!(self.out, "{payload}")
            }
            OutputMode::Plain { color } => {
                let mark = if color {
                    "✓".green().to_string()
                } else {
                    "✓".to_string()
                };
                writeln!(self.out, "{mark} Task {verb}: {}", task.description)
            }
        }
    }
}

fn status_mark(task: &Task, color: bool) -> String {
    match (task.completed, color) {
        (true, true) => "✓".green().to_string(),
        (true, false) => "✓".to_string(),
        (false, true) => "○".dimmed().to_string(),
        (false, false) => "○".to_string(),
    }
}

fn priority_tag(task: &Task, color: bool) -> String {
    let tag = format!("[{}]", task.priority.label());
    if !color {
        return tag;
    }
    match task.priority {
        crate::model::Priority::High => tag.red().bold().to_string(),
        crate::model::Priority::Medium => tag.yellow().to_string(),
        crate::model::Priority::Low => tag.blue().to_string(),
    }
}

fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

fn display_date(timestamp: OffsetDateTime, offset: UtcOffset) -> String {
    let date = timestamp.to_offset(offset).date();
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| date.to_string())
}
