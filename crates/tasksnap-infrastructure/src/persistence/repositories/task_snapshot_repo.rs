use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::warn;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use tasksnap_domain::shared::{DomainError, TaskId};
use tasksnap_domain::task::{TaskCategory, TaskRecord, TaskSnapshotSource, TaskStatus};

use crate::persistence::result_ext::ResultExt;

/// Read-only SQLite view over the task table maintained by the task-store
/// collaborator. Each call materializes a fresh owned snapshot, so evaluation
/// never races writers.
pub struct SqliteTaskSnapshotRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteTaskSnapshotRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

fn parse_optional_datetime(
    raw: Option<String>,
    field: &str,
    id: &str,
) -> Result<Option<DateTime<Utc>>, DomainError> {
    match raw {
        Some(value) => value
            .parse::<DateTime<Utc>>()
            .map(Some)
            .map_err(|e| {
                DomainError::Deserialization(format!(
                    "Invalid {} on task {}: {}",
                    field, id, e
                ))
            }),
        None => Ok(None),
    }
}

#[async_trait]
impl TaskSnapshotSource for SqliteTaskSnapshotRepository {
    async fn snapshot(&self) -> Result<Vec<TaskRecord>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, status, category, created_at, started_at, completed_at,
                   is_urgent, has_before_photo, has_after_photo
            FROM tasks
            ORDER BY created_at
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await
        .map_repo_error("Failed to load task snapshot")?;

        let mut tasks = Vec::with_capacity(rows.len());
        for row in rows {
            let id: String = row.get("id");

            let parsed = (|| -> Result<TaskRecord, DomainError> {
                let status = TaskStatus::from_str(row.get::<String, _>("status").as_str())?;
                let category = TaskCategory::from_str(row.get::<String, _>("category").as_str())?;
                let created_at = row
                    .get::<String, _>("created_at")
                    .parse::<DateTime<Utc>>()
                    .map_err(|e| {
                        DomainError::Deserialization(format!(
                            "Invalid created_at on task {}: {}",
                            id, e
                        ))
                    })?;

                Ok(TaskRecord {
                    id: TaskId::from_string(&id),
                    status,
                    category,
                    created_at,
                    started_at: parse_optional_datetime(row.get("started_at"), "started_at", &id)?,
                    completed_at: parse_optional_datetime(
                        row.get("completed_at"),
                        "completed_at",
                        &id,
                    )?,
                    is_urgent: row.get("is_urgent"),
                    has_before_photo: row.get("has_before_photo"),
                    has_after_photo: row.get("has_after_photo"),
                })
            })();

            match parsed {
                Ok(task) => tasks.push(task),
                // One bad row must not poison evaluation of the rest.
                Err(e) => warn!("[task_repo] skip unreadable task id={} err={}", id, e),
            }
        }

        Ok(tasks)
    }
}
