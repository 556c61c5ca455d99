mod task;

pub use task::{ListFilter, Priority, Task, now_timestamp};
