pub mod config;
pub mod error;
pub mod model;
pub mod render;
pub mod storage;
pub mod task_store;
pub mod warning;

pub use task_store::{TaskStats, TaskStore};
