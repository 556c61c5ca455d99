pub mod json_store;

pub use json_store::{
    LoadedTasks, SkippedEntry, default_store_path, read_tasks, restrict_permissions, write_tasks,
};
