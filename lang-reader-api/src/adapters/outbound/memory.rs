//! In-memory project repository.
//!
//! Backs the `memory` storage option and the test suites.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{
    models::{Project, ProjectId},
    ports::outbound::ProjectRepository,
    ProjectError,
};

/// Project repository backed by a vector kept in insertion order.
#[derive(Clone, Default)]
pub struct InMemoryProjectRepository {
    projects: Arc<RwLock<Vec<Project>>>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn is_empty(&self) -> bool {
        self.projects.read().await.is_empty()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn list(&self) -> Result<Vec<Project>, ProjectError> {
        // Reverse first so projects sharing a timestamp stay newest-first
        // under the stable sort.
        let mut projects = self
            .projects
            .read()
            .await
            .iter()
            .rev()
            .cloned()
            .collect::<Vec<_>>();
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(projects)
    }

    async fn get(&self, id: &ProjectId) -> Result<Option<Project>, ProjectError> {
        let projects = self.projects.read().await;
        Ok(projects.iter().find(|p| p.id == *id).cloned())
    }

    async fn insert(&self, project: &Project) -> Result<(), ProjectError> {
        let mut projects = self.projects.write().await;
        if projects.iter().any(|p| p.id == project.id) {
            return Err(ProjectError::storage(format!(
                "duplicate project id {}",
                project.id
            )));
        }
        projects.push(project.clone());

        Ok(())
    }

    async fn update(&self, project: &Project) -> Result<(), ProjectError> {
        let mut projects = self.projects.write().await;
        let stored = projects
            .iter_mut()
            .find(|p| p.id == project.id)
            .ok_or(ProjectError::NotFound)?;
        *stored = project.clone();

        Ok(())
    }

    async fn delete(&self, id: &ProjectId) -> Result<(), ProjectError> {
        let mut projects = self.projects.write().await;
        let index = projects
            .iter()
            .position(|p| p.id == *id)
            .ok_or(ProjectError::NotFound)?;
        projects.remove(index);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use time::{Duration, OffsetDateTime};

    use super::*;
    use crate::domain::models::NewProject;

    fn project_at(name: &str, created_at: OffsetDateTime) -> Project {
        Project::create(NewProject::named(name), created_at).unwrap()
    }

    #[tokio::test]
    async fn list_sorts_by_created_at_not_insertion() {
        let repo = InMemoryProjectRepository::new();
        let now = OffsetDateTime::now_utc();

        let older = project_at("older", now - Duration::hours(1));
        let newer = project_at("newer", now);
        repo.insert(&newer).await.unwrap();
        repo.insert(&older).await.unwrap();

        let names = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["newer", "older"]);
    }

    #[tokio::test]
    async fn equal_timestamps_list_latest_insert_first() {
        let repo = InMemoryProjectRepository::new();
        let now = OffsetDateTime::now_utc();

        repo.insert(&project_at("first", now)).await.unwrap();
        repo.insert(&project_at("second", now)).await.unwrap();

        let names = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn update_and_delete_unknown_ids_are_not_found() {
        let repo = InMemoryProjectRepository::new();
        let project = project_at("ghost", OffsetDateTime::now_utc());

        assert!(matches!(
            repo.update(&project).await,
            Err(ProjectError::NotFound)
        ));
        assert!(matches!(
            repo.delete(&project.id).await,
            Err(ProjectError::NotFound)
        ));
    }
}
