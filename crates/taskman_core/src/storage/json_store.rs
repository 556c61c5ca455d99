use crate::error::AppError;
use crate::model::Task;
use serde_json::Value;
use std::path::{Path, PathBuf};

const STORE_FILE_NAME: &str = "tasks.json";

/// Tasks decoded from a store file, plus the entries that had to be dropped.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadedTasks {
    pub tasks: Vec<Task>,
    pub skipped: Vec<SkippedEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub index: usize,
    pub error: AppError,
}

pub fn default_store_path() -> PathBuf {
    Path::new(".").join(STORE_FILE_NAME)
}

/// Reads the task array at `path`.
///
/// A missing file is an empty collection. A file that is not a JSON array is
/// an error; individual entries that do not decode into a [`Task`] are
/// reported in [`LoadedTasks::skipped`] and left out.
pub fn read_tasks(path: &Path) -> Result<LoadedTasks, AppError> {
    if !path.exists() {
        log::debug!("no store at {}, starting empty", path.display());
        return Ok(LoadedTasks::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
    let document: Value = serde_json::from_str(&content)
        .map_err(|err| AppError::invalid_data(format!("invalid JSON: {err}")))?;
    let Value::Array(entries) = document else {
        return Err(AppError::invalid_data("expected a JSON array of tasks"));
    };

    let mut loaded = LoadedTasks::default();
    for (index, entry) in entries.into_iter().enumerate() {
        match decode_entry(entry) {
            Ok(task) => loaded.tasks.push(task),
            Err(error) => loaded.skipped.push(SkippedEntry { index, error }),
        }
    }

    log::debug!(
        "loaded {} task(s) from {} ({} skipped)",
        loaded.tasks.len(),
        path.display(),
        loaded.skipped.len()
    );
    Ok(loaded)
}

fn decode_entry(entry: Value) -> Result<Task, AppError> {
    let task: Task = serde_json::from_value(entry)?;
    if task.description.trim().is_empty() {
        return Err(AppError::invalid_data("description must not be empty"));
    }
    Ok(task)
}

/// Overwrites `path` with the pretty-printed task array.
pub fn write_tasks(path: &Path, tasks: &[Task]) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|err| AppError::io(err.to_string()))?;
    }

    let content = serde_json::to_string_pretty(tasks)?;
    std::fs::write(path, content)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;

    log::debug!("saved {} task(s) to {}", tasks.len(), path.display());
    Ok(())
}

/// Limits the store file to its owner. A no-op off unix.
pub fn restrict_permissions(path: &Path) -> Result<(), AppError> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, permissions)
            .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
    }
    #[cfg(not(unix))]
    let _ = path;

    Ok(())
}
