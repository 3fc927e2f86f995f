use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::warn;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use tasksnap_domain::achievement::{AchievementStateRecord, AchievementStateRepository};
use tasksnap_domain::shared::{AchievementId, DomainError};

use crate::persistence::result_ext::ResultExt;

/// SQLite implementation of AchievementStateRepository
pub struct SqliteAchievementStateRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteAchievementStateRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AchievementStateRepository for SqliteAchievementStateRepository {
    async fn load_all(&self) -> Result<Vec<AchievementStateRecord>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, is_unlocked, unlocked_at, progress
            FROM achievement_state
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await
        .map_repo_error("Failed to load achievement state")?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let id: String = row.get("id");
            let is_unlocked: bool = row.get("is_unlocked");
            let unlocked_at_raw: Option<String> = row.get("unlocked_at");
            let progress: f64 = row.get("progress");

            // A corrupt row degrades to the canonical seed for that id
            // instead of failing startup.
            let unlocked_at = match unlocked_at_raw {
                Some(raw) => match raw.parse::<DateTime<Utc>>() {
                    Ok(at) => Some(at),
                    Err(e) => {
                        warn!(
                            "[achievement_repo] skip corrupt row id={} unlocked_at={} err={}",
                            id, raw, e
                        );
                        continue;
                    }
                },
                None => None,
            };

            if !progress.is_finite() {
                warn!(
                    "[achievement_repo] skip corrupt row id={} progress={}",
                    id, progress
                );
                continue;
            }

            records.push(AchievementStateRecord {
                id: AchievementId::new(id),
                is_unlocked,
                unlocked_at,
                progress: progress.clamp(0.0, 1.0),
            });
        }

        Ok(records)
    }

    async fn save_all(&self, records: &[AchievementStateRecord]) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_repo_error("Failed to open achievement save transaction")?;

        for record in records {
            sqlx::query(
                r#"
                INSERT INTO achievement_state (id, is_unlocked, unlocked_at, progress, updated_at)
                VALUES (?, ?, ?, ?, strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
                ON CONFLICT(id) DO UPDATE SET
                    is_unlocked = excluded.is_unlocked,
                    unlocked_at = excluded.unlocked_at,
                    progress = excluded.progress,
                    updated_at = excluded.updated_at
                "#,
            )
            .bind(record.id.as_str())
            .bind(record.is_unlocked)
            .bind(record.unlocked_at.map(|at| at.to_rfc3339()))
            .bind(record.progress)
            .execute(&mut *tx)
            .await
            .map_repo_error("Failed to save achievement state")?;
        }

        tx.commit()
            .await
            .map_repo_error("Failed to commit achievement state")?;

        Ok(())
    }
}
