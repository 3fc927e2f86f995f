use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{DomainError, TaskId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Todo,
    Doing,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::Doing => "doing",
            TaskStatus::Done => "done",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "todo" => Ok(TaskStatus::Todo),
            "doing" => Ok(TaskStatus::Doing),
            "done" => Ok(TaskStatus::Done),
            other => Err(DomainError::InvalidInput(format!(
                "Unknown task status: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskCategory {
    Cleaning,
    Laundry,
    Kitchen,
    Organizing,
    Outdoor,
    Errands,
    SelfCare,
    Other,
}

impl TaskCategory {
    pub const ALL: [TaskCategory; 8] = [
        TaskCategory::Cleaning,
        TaskCategory::Laundry,
        TaskCategory::Kitchen,
        TaskCategory::Organizing,
        TaskCategory::Outdoor,
        TaskCategory::Errands,
        TaskCategory::SelfCare,
        TaskCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::Cleaning => "cleaning",
            TaskCategory::Laundry => "laundry",
            TaskCategory::Kitchen => "kitchen",
            TaskCategory::Organizing => "organizing",
            TaskCategory::Outdoor => "outdoor",
            TaskCategory::Errands => "errands",
            TaskCategory::SelfCare => "self_care",
            TaskCategory::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "cleaning" => Ok(TaskCategory::Cleaning),
            "laundry" => Ok(TaskCategory::Laundry),
            "kitchen" => Ok(TaskCategory::Kitchen),
            "organizing" => Ok(TaskCategory::Organizing),
            "outdoor" => Ok(TaskCategory::Outdoor),
            "errands" => Ok(TaskCategory::Errands),
            "self_care" => Ok(TaskCategory::SelfCare),
            "other" => Ok(TaskCategory::Other),
            other => Err(DomainError::InvalidInput(format!(
                "Unknown task category: {}",
                other
            ))),
        }
    }
}

/// Read-only snapshot of a task as the evaluation engine sees it. The task
/// store itself (editing, photos, sync) lives outside this core; evaluation
/// only ever reads a materialized copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: TaskId,
    pub status: TaskStatus,
    pub category: TaskCategory,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub is_urgent: bool,
    pub has_before_photo: bool,
    pub has_after_photo: bool,
}

impl TaskRecord {
    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }

    /// Hour-of-day of the completion timestamp. A done task without a
    /// completion timestamp yields None and is excluded from time-based
    /// criteria counts.
    pub fn completed_hour(&self) -> Option<u32> {
        self.completed_at.map(|at| at.hour())
    }
}
