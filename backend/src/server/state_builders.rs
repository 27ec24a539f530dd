//! Storage backend selection and HTTP state construction.

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::info;

use todo_backend::inbound::http::state::HttpState;
use todo_backend::outbound::memory::{
    InMemoryStore, InMemoryTodoListRepository, InMemoryTodoTaskRepository, InMemoryUserRepository,
};
use todo_backend::outbound::persistence::{
    DbPool, DieselTodoListRepository, DieselTodoTaskRepository, DieselUserRepository,
    MigrationError, PoolConfig, PoolError, run_migrations,
};

use super::config::{AppSettings, ConfigError, StorageBackend};

/// Failures while preparing the storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// Settings were invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Schema migrations failed.
    #[error(transparent)]
    Migration(#[from] MigrationError),
    /// The connection pool could not be built.
    #[error(transparent)]
    Pool(#[from] PoolError),
    /// The blocking migration task panicked or was cancelled.
    #[error("migration task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

fn memory_state() -> HttpState {
    let store = Arc::new(InMemoryStore::new());
    HttpState::from_repositories(
        Arc::new(InMemoryUserRepository::new(Arc::clone(&store))),
        Arc::new(InMemoryTodoListRepository::new(Arc::clone(&store))),
        Arc::new(InMemoryTodoTaskRepository::new(store)),
        Arc::new(DefaultClock),
    )
}

async fn sqlite_state(settings: &AppSettings) -> Result<HttpState, StartupError> {
    let database_url = settings.database_url().to_owned();
    let migrate_url = database_url.clone();
    let applied = tokio::task::spawn_blocking(move || run_migrations(&migrate_url)).await??;
    info!(%database_url, applied, "database schema up to date");

    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.db_max_connections()?),
    )
    .await?;
    Ok(HttpState::from_repositories(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselTodoListRepository::new(pool.clone())),
        Arc::new(DieselTodoTaskRepository::new(pool)),
        Arc::new(DefaultClock),
    ))
}

/// Construct the repositories for the configured backend and wire the
/// services over them.
///
/// Called once before the server starts; handlers only ever see the trait
/// objects in [`HttpState`].
pub async fn build_http_state(settings: &AppSettings) -> Result<HttpState, StartupError> {
    let storage = settings.storage()?;
    info!(%storage, "initialising storage backend");
    match storage {
        StorageBackend::Memory => Ok(memory_state()),
        StorageBackend::Sqlite => sqlite_state(settings).await,
    }
}
