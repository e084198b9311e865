//! Project repository port (outbound).
//!
//! Defines the interface a storage engine must offer to persist projects
//! together with their breakpoints.

use async_trait::async_trait;

use crate::domain::{
    models::{Project, ProjectId},
    ProjectError,
};

/// Outbound port for project persistence.
///
/// Every method operates on a whole project: breakpoints are written,
/// replaced and removed together with the row that owns them.
#[async_trait]
pub trait ProjectRepository: Send + Sync + 'static {
    /// All stored projects ordered by `created_at`, newest first.
    async fn list(&self) -> Result<Vec<Project>, ProjectError>;

    async fn get(&self, id: &ProjectId) -> Result<Option<Project>, ProjectError>;

    async fn insert(&self, project: &Project) -> Result<(), ProjectError>;

    /// Replace the stored state of an existing project.
    ///
    /// Returns `ProjectError::NotFound` if no row matched.
    async fn update(&self, project: &Project) -> Result<(), ProjectError>;

    /// Returns `ProjectError::NotFound` if no row matched.
    async fn delete(&self, id: &ProjectId) -> Result<(), ProjectError>;
}
