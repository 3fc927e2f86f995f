//! Composition root. Wires the SQLite repositories, the event bus and the
//! service together and replays persisted state into the canonical catalog.

use std::sync::Arc;

use log::{info, warn};

use tasksnap_domain::achievement::{AchievementCatalog, AchievementStateRepository};
use tasksnap_domain::streak::{StreakState, StreakStateRepository};
use tasksnap_infrastructure::events::InMemoryEventBus;
use tasksnap_infrastructure::logging;
use tasksnap_infrastructure::persistence::repositories::{
    SqliteAchievementStateRepository, SqliteStreakStateRepository, SqliteTaskSnapshotRepository,
};
use tasksnap_infrastructure::persistence::Database;

use crate::services::AchievementService;

/// A fully wired engine instance. Subscribe handlers on `event_bus` before
/// driving mutations through `service`.
pub struct Engine {
    service: Arc<AchievementService>,
    event_bus: Arc<InMemoryEventBus>,
}

impl Engine {
    pub fn service(&self) -> &Arc<AchievementService> {
        &self.service
    }

    pub fn event_bus(&self) -> &Arc<InMemoryEventBus> {
        &self.event_bus
    }
}

/// Open (or create) the database at `db_path`, run migrations and assemble
/// the engine around it.
pub async fn build_engine(db_path: &str) -> anyhow::Result<Engine> {
    if let Err(e) = logging::init_logger(logging::default_log_dir()) {
        eprintln!("Logger initialization failed: {}", e);
    }

    let database = Database::new(db_path).await?;
    database.run_migrations().await?;
    build_engine_with_database(&database).await
}

/// Assemble the engine over an already migrated database. Lets tests and
/// embedders share one pool across rebuilds.
pub async fn build_engine_with_database(database: &Database) -> anyhow::Result<Engine> {
    let pool = Arc::new(database.pool().clone());

    let task_source = Arc::new(SqliteTaskSnapshotRepository::new(pool.clone()));
    let achievement_repo = Arc::new(SqliteAchievementStateRepository::new(pool.clone()));
    let streak_repo = Arc::new(SqliteStreakStateRepository::new(pool));
    let event_bus = Arc::new(InMemoryEventBus::new());

    // Persisted earned state is merged onto the canonical definitions by id.
    // Newly shipped entries start locked; rows for removed ids are dropped
    // inside the merge with a warning.
    let mut catalog = AchievementCatalog::seeded();
    match achievement_repo.load_all().await {
        Ok(records) => catalog.merge_persisted(&records),
        Err(e) => warn!(
            "[bootstrap] achievement state unreadable, starting from seeded catalog: {}",
            e.format_with_code()
        ),
    }

    let streak = match streak_repo.load().await {
        Ok(state) => state,
        Err(e) => {
            warn!(
                "[bootstrap] streak state unreadable, starting zeroed: {}",
                e.format_with_code()
            );
            StreakState::new()
        }
    };

    // Seed rows for any catalog entries the store has never seen, so later
    // partial failures still leave a complete row set behind.
    if let Err(e) = achievement_repo.save_all(&catalog.to_state_records()).await {
        warn!(
            "[bootstrap] initial achievement save failed, retrying on next mutation: {}",
            e.format_with_code()
        );
    }

    info!(
        "[bootstrap] engine ready achievements={} unlocked={} streak={}",
        catalog.len(),
        catalog.unlocked_count(),
        streak.current_streak()
    );

    let service = Arc::new(AchievementService::new(
        catalog,
        streak,
        task_source,
        achievement_repo,
        streak_repo,
        event_bus.clone(),
    ));

    Ok(Engine { service, event_bus })
}
