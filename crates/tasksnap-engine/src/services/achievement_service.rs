use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{error, info};
use tokio::sync::Mutex;

use tasksnap_domain::achievement::{
    AchievementCatalog, AchievementEvaluator, AchievementGroup, AchievementStateRepository,
};
use tasksnap_domain::events::{AchievementUnlocked, DomainEvent, EventBus, StreakBroken, StreakGrew};
use tasksnap_domain::shared::DomainError;
use tasksnap_domain::streak::{StreakState, StreakStateRepository, StreakTransition};
use tasksnap_domain::task::TaskSnapshotSource;

use crate::dtos::{AchievementDto, StreakDto};

/// Achievement and streak state behind one mutex.
///
/// Everything the evaluator can write sits in here, so holding the lock for
/// the full completion pipeline guarantees readers see either the pre- or the
/// fully-post-evaluation catalog, never a half-written one.
struct EngineState {
    catalog: AchievementCatalog,
    streak: StreakState,
}

/// The single serialized owner of achievement and streak state.
///
/// One instance is constructed at the composition root and shared by `Arc`;
/// there is no ambient global. Every mutation follows the same shape: lock,
/// mutate against one consistent task snapshot and one `now`, persist, then
/// publish the resulting events in commit order.
pub struct AchievementService {
    state: Mutex<EngineState>,
    tasks: Arc<dyn TaskSnapshotSource>,
    achievement_repo: Arc<dyn AchievementStateRepository>,
    streak_repo: Arc<dyn StreakStateRepository>,
    event_bus: Arc<dyn EventBus>,
}

impl AchievementService {
    pub fn new(
        catalog: AchievementCatalog,
        streak: StreakState,
        tasks: Arc<dyn TaskSnapshotSource>,
        achievement_repo: Arc<dyn AchievementStateRepository>,
        streak_repo: Arc<dyn StreakStateRepository>,
        event_bus: Arc<dyn EventBus>,
    ) -> Self {
        Self {
            state: Mutex::new(EngineState { catalog, streak }),
            tasks,
            achievement_repo,
            streak_repo,
            event_bus,
        }
    }

    /// React to one task-completion event at `now`: update the streak,
    /// re-evaluate every locked achievement against a fresh task snapshot,
    /// persist, and forward whatever signals the transition produced.
    pub async fn handle_task_completed(&self, now: DateTime<Utc>) -> Result<(), DomainError> {
        let mut pending: Vec<Box<dyn DomainEvent>> = Vec::new();

        {
            let mut state = self.state.lock().await;
            let state = &mut *state;

            // Snapshot under the lock: the streak update and the evaluation
            // must see the same task collection and the same `now`.
            let tasks = self.tasks.snapshot().await?;

            let transition = state.streak.record_completion(now);
            if let StreakTransition::Extended { new_streak } = transition {
                if new_streak > 1 {
                    pending.push(Box::new(StreakGrew {
                        new_streak,
                        occurred_at: now,
                    }));
                }
            }

            let unlocks =
                AchievementEvaluator::evaluate(&mut state.catalog, &tasks, &state.streak, now);

            self.persist(&state).await;

            for unlock in unlocks {
                pending.push(Box::new(AchievementUnlocked {
                    achievement_id: unlock.id,
                    title: unlock.title,
                    occurred_at: now,
                }));
            }

            info!(
                "[engine] completion handled streak={} transition={:?} events={}",
                state.streak.current_streak(),
                transition,
                pending.len()
            );
        }

        self.dispatch(pending).await;
        Ok(())
    }

    /// App-foreground / day-open hook: break a stale streak exactly once.
    pub async fn handle_app_foregrounded(&self, now: DateTime<Utc>) -> Result<(), DomainError> {
        let mut pending: Vec<Box<dyn DomainEvent>> = Vec::new();

        {
            let mut state = self.state.lock().await;

            if let Some(prior_streak) = state.streak.check_expiry(now) {
                if let Err(e) = self.streak_repo.save(&state.streak).await {
                    error!(
                        "[engine] streak save failed, retrying on next mutation: {}",
                        e.format_with_code()
                    );
                }
                info!("[engine] streak broken prior={}", prior_streak);
                pending.push(Box::new(StreakBroken {
                    prior_streak,
                    occurred_at: now,
                }));
            }
        }

        self.dispatch(pending).await;
        Ok(())
    }

    /// Current state of every catalog entry, in catalog order.
    pub async fn achievement_overview(&self) -> Vec<AchievementDto> {
        let state = self.state.lock().await;
        state.catalog.iter().map(AchievementDto::from).collect()
    }

    /// Catalog entries carrying the given group tag.
    pub async fn achievements_in_group(&self, group: AchievementGroup) -> Vec<AchievementDto> {
        let state = self.state.lock().await;
        state
            .catalog
            .in_group(group)
            .into_iter()
            .map(AchievementDto::from)
            .collect()
    }

    pub async fn streak_overview(&self, now: DateTime<Utc>) -> StreakDto {
        let state = self.state.lock().await;
        StreakDto {
            current_streak: state.streak.current_streak(),
            longest_streak: state.streak.longest_streak(),
            growth_stage: state.streak.growth_stage(),
            last_completion_day: state
                .streak
                .last_completion_day()
                .map(|d| d.format("%Y-%m-%d").to_string()),
            at_risk: state.streak.is_at_risk(now),
        }
    }

    /// Best-effort full save. A failed write keeps the in-memory state and is
    /// retried implicitly because every future mutation saves everything
    /// again.
    async fn persist(&self, state: &EngineState) {
        if let Err(e) = self.streak_repo.save(&state.streak).await {
            error!(
                "[engine] streak save failed, retrying on next mutation: {}",
                e.format_with_code()
            );
        }
        if let Err(e) = self
            .achievement_repo
            .save_all(&state.catalog.to_state_records())
            .await
        {
            error!(
                "[engine] achievement save failed, retrying on next mutation: {}",
                e.format_with_code()
            );
        }
    }

    /// Deliver events strictly after the state commit, in commit order. The
    /// lock is already released; a slow or failing subscriber cannot stall
    /// state mutations.
    async fn dispatch(&self, events: Vec<Box<dyn DomainEvent>>) {
        for event in events {
            let name = event.event_type_name();
            if let Err(e) = self.event_bus.publish(event).await {
                error!("[engine] event delivery failed for {}: {}", name, e);
            }
        }
    }
}
