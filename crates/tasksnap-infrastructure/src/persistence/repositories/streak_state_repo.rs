use async_trait::async_trait;
use chrono::NaiveDate;
use log::warn;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use tasksnap_domain::shared::DomainError;
use tasksnap_domain::streak::{StreakState, StreakStateRepository};

use crate::persistence::result_ext::ResultExt;

/// SQLite implementation of StreakStateRepository (singleton row)
pub struct SqliteStreakStateRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteStreakStateRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StreakStateRepository for SqliteStreakStateRepository {
    async fn load(&self) -> Result<StreakState, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT current_streak, longest_streak, last_completion_day
            FROM streak_state
            WHERE id = 1
            "#,
        )
        .fetch_optional(self.pool.as_ref())
        .await
        .map_repo_error("Failed to load streak state")?;

        let Some(row) = row else {
            return Ok(StreakState::new());
        };

        let current: i64 = row.get("current_streak");
        let longest: i64 = row.get("longest_streak");
        let last_day_raw: Option<String> = row.get("last_completion_day");

        if current < 0 || longest < 0 {
            warn!(
                "[streak_repo] corrupt streak row current={} longest={}, resetting",
                current, longest
            );
            return Ok(StreakState::new());
        }

        let last_completion_day = match last_day_raw {
            Some(raw) => match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
                Ok(day) => Some(day),
                Err(e) => {
                    warn!(
                        "[streak_repo] corrupt last_completion_day={} err={}, resetting",
                        raw, e
                    );
                    return Ok(StreakState::new());
                }
            },
            None => None,
        };

        Ok(StreakState::restore(
            current as u32,
            longest as u32,
            last_completion_day,
        ))
    }

    async fn save(&self, state: &StreakState) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO streak_state (id, current_streak, longest_streak, last_completion_day, updated_at)
            VALUES (1, ?, ?, ?, strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
            ON CONFLICT(id) DO UPDATE SET
                current_streak = excluded.current_streak,
                longest_streak = excluded.longest_streak,
                last_completion_day = excluded.last_completion_day,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(state.current_streak() as i64)
        .bind(state.longest_streak() as i64)
        .bind(state.last_completion_day().map(|d| d.format("%Y-%m-%d").to_string()))
        .execute(self.pool.as_ref())
        .await
        .map_repo_error("Failed to save streak state")?;

        Ok(())
    }
}
