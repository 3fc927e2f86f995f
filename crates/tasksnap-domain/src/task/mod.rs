mod record;
mod repository;


pub use record::{TaskCategory, TaskRecord, TaskStatus};
pub use repository::TaskSnapshotSource;
