//! Composition root: picks the storage adapter and wires the project service.
//!
//! This is the ONLY place that imports concrete outbound adapters.

use std::sync::Arc;

use crate::{
    adapters::outbound::{memory::InMemoryProjectRepository, postgres::PostgresProjectRepository},
    config::{DatabaseSettings, StorageBackend},
    domain::{ports::inbound::ProjectService, services::ProjectServiceImpl},
    startup,
};

pub async fn project_service(
    storage: StorageBackend,
    database: &DatabaseSettings,
) -> anyhow::Result<Arc<dyn ProjectService>> {
    match storage {
        StorageBackend::Postgres => {
            let pool = startup::connect_with_retry(database).await?;
            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("Database schema is up to date");

            let repository = Arc::new(PostgresProjectRepository::new(pool));
            Ok(Arc::new(ProjectServiceImpl::new(repository)))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, projects will not survive a restart");

            let repository = Arc::new(InMemoryProjectRepository::new());
            Ok(Arc::new(ProjectServiceImpl::new(repository)))
        }
    }
}
