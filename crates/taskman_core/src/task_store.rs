use crate::error::AppError;
use crate::model::{ListFilter, Priority, Task, now_timestamp};
use crate::storage::json_store;
use crate::warning::{LogWarnings, StoreWarning, WarningSink};
use std::path::PathBuf;
use time::OffsetDateTime;

/// Owns the task collection for one invocation and mediates every read and
/// write of the backing file.
///
/// Storage failures never escape: loading degrades to an empty collection and
/// saving reports `false`, both with a [`StoreWarning`] sent to the sink.
pub struct TaskStore<W: WarningSink = LogWarnings> {
    path: PathBuf,
    tasks: Vec<Task>,
    warnings: W,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Percentage rounded to one decimal place; `0.0` for an empty collection.
    pub completion_rate: f64,
}

impl TaskStats {
    fn from_tasks(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|task| task.completed).count();
        let completion_rate = if total == 0 {
            0.0
        } else {
            let percent = completed as f64 / total as f64 * 100.0;
            (percent * 10.0).round() / 10.0
        };

        Self {
            total,
            completed,
            pending: total - completed,
            completion_rate,
        }
    }

    /// `0%` when there are no tasks, otherwise the rate with one decimal (`50.0%`).
    pub fn rate_label(&self) -> String {
        if self.total == 0 {
            "0%".to_string()
        } else {
            format!("{:.1}%", self.completion_rate)
        }
    }
}

impl TaskStore<LogWarnings> {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::load(path, LogWarnings)
    }
}

impl<W: WarningSink> TaskStore<W> {
    pub fn load(path: impl Into<PathBuf>, warnings: W) -> Self {
        let path = path.into();
        let tasks = match json_store::read_tasks(&path) {
            Ok(loaded) => {
                for skipped in loaded.skipped {
                    warnings.warn(StoreWarning::MalformedEntry {
                        path: path.clone(),
                        index: skipped.index,
                        error: skipped.error,
                    });
                }
                loaded.tasks
            }
            Err(error) => {
                warnings.warn(StoreWarning::LoadFailed {
                    path: path.clone(),
                    error,
                });
                Vec::new()
            }
        };

        Self {
            path,
            tasks,
            warnings,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn warnings(&self) -> &W {
        &self.warnings
    }

    /// Writes the collection. A failure to tighten the file's permissions
    /// afterwards is warned about but still counts as a successful save.
    pub fn save(&self) -> bool {
        if let Err(error) = json_store::write_tasks(&self.path, &self.tasks) {
            self.warnings.warn(StoreWarning::SaveFailed {
                path: self.path.clone(),
                error,
            });
            return false;
        }

        if let Err(error) = json_store::restrict_permissions(&self.path) {
            self.warnings.warn(StoreWarning::PermissionsNotRestricted {
                path: self.path.clone(),
                error,
            });
        }
        true
    }

    pub fn add_task(&mut self, description: &str, priority: Priority) -> Result<Task, AppError> {
        if description.trim().is_empty() {
            return Err(AppError::invalid_input("description is required"));
        }

        let created_at = now_timestamp();
        let task = Task::new(self.next_id(created_at), description, priority, created_at);
        self.tasks.push(task.clone());
        self.save();

        Ok(task)
    }

    pub fn list_tasks(&self, filter: ListFilter) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |task| filter.matches(task))
    }

    /// Completes the first task with `id`. `None` means no task matched.
    pub fn complete_task(&mut self, id: u64) -> Option<Task> {
        let task = self.tasks.iter_mut().find(|task| task.id == id)?;
        task.mark_completed(now_timestamp());
        let updated = task.clone();
        self.save();

        Some(updated)
    }

    /// Removes the first task with `id`, keeping the order of the rest.
    pub fn delete_task(&mut self, id: u64) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id == id)?;
        let removed = self.tasks.remove(index);
        self.save();

        Some(removed)
    }

    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(&self.tasks)
    }

    // Millisecond clock, bumped past the largest stored id so two tasks
    // created within the same millisecond still get distinct ids.
    fn next_id(&self, now: OffsetDateTime) -> u64 {
        let millis = u64::try_from(now.unix_timestamp_nanos() / 1_000_000).unwrap_or(0);
        let floor = self
            .tasks
            .iter()
            .map(|task| task.id.saturating_add(1))
            .max()
            .unwrap_or(0);
        millis.max(floor)
    }
}
