use crate::error::AppError;
use std::cell::RefCell;
use std::fmt;
use std::path::PathBuf;

/// A storage failure the store recovered from instead of propagating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreWarning {
    LoadFailed { path: PathBuf, error: AppError },
    MalformedEntry { path: PathBuf, index: usize, error: AppError },
    SaveFailed { path: PathBuf, error: AppError },
    PermissionsNotRestricted { path: PathBuf, error: AppError },
    ConfigIgnored { error: AppError },
}

impl fmt::Display for StoreWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadFailed { path, error } => {
                write!(f, "Error loading tasks from {}: {}", path.display(), error)
            }
            Self::MalformedEntry { path, index, error } => write!(
                f,
                "Skipping malformed task #{} in {}: {}",
                index,
                path.display(),
                error
            ),
            Self::SaveFailed { path, error } => {
                write!(f, "Error saving tasks to {}: {}", path.display(), error)
            }
            Self::PermissionsNotRestricted { path, error } => write!(
                f,
                "Saved tasks to {} but could not restrict its permissions: {}",
                path.display(),
                error
            ),
            Self::ConfigIgnored { error } => write!(f, "Ignoring configuration: {}", error),
        }
    }
}

pub trait WarningSink {
    fn warn(&self, warning: StoreWarning);
}

/// Forwards every warning to the `log` facade.
pub struct LogWarnings;

impl WarningSink for LogWarnings {
    fn warn(&self, warning: StoreWarning) {
        log::warn!("{warning}");
    }
}

/// Keeps warnings in memory so callers can inspect them afterwards.
#[derive(Debug, Default)]
pub struct CollectedWarnings {
    warnings: RefCell<Vec<StoreWarning>>,
}

impl CollectedWarnings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<StoreWarning> {
        self.warnings.take()
    }

    pub fn len(&self) -> usize {
        self.warnings.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.borrow().is_empty()
    }
}

impl WarningSink for CollectedWarnings {
    fn warn(&self, warning: StoreWarning) {
        self.warnings.borrow_mut().push(warning);
    }
}

impl<W: WarningSink + ?Sized> WarningSink for &W {
    fn warn(&self, warning: StoreWarning) {
        (**self).warn(warning)
    }
}

impl<W: WarningSink + ?Sized> WarningSink for Box<W> {
    fn warn(&self, warning: StoreWarning) {
        (**self).warn(warning)
    }
}
