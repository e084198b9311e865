use async_trait::async_trait;

use crate::domain::{
    models::{NewProject, Project, ProjectId, ProjectPatch},
    ProjectError,
};

/// Inbound port for the project store.
#[async_trait]
pub trait ProjectService: Send + Sync + 'static {
    /// All projects, newest first.
    async fn list_projects(&self) -> Result<Vec<Project>, ProjectError>;

    async fn get_project(&self, id: &ProjectId) -> Result<Project, ProjectError>;

    async fn create_project(&self, new: NewProject) -> Result<Project, ProjectError>;

    /// Overwrite the fields present in `patch` and refresh `updated_at`.
    async fn update_project(
        &self,
        id: &ProjectId,
        patch: ProjectPatch,
    ) -> Result<Project, ProjectError>;

    async fn delete_project(&self, id: &ProjectId) -> Result<(), ProjectError>;
}
