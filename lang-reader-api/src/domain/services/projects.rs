use std::sync::Arc;

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::domain::{
    models::{NewProject, Project, ProjectId, ProjectPatch},
    ports::{inbound::ProjectService, outbound::ProjectRepository},
    ProjectError,
};

/// Implementation of the ProjectService inbound port.
///
/// Owns validation and timestamping; the repository only stores what it is
/// handed.
pub struct ProjectServiceImpl<R> {
    repository: Arc<R>,
}

impl<R> ProjectServiceImpl<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

/// Current time truncated to microseconds, the precision Postgres keeps.
fn now() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    now.replace_nanosecond(now.nanosecond() / 1_000 * 1_000)
        .unwrap_or(now)
}

#[async_trait]
impl<R: ProjectRepository> ProjectService for ProjectServiceImpl<R> {
    async fn list_projects(&self) -> Result<Vec<Project>, ProjectError> {
        let projects = self.repository.list().await?;
        tracing::debug!("Found {} projects", projects.len());
        Ok(projects)
    }

    async fn get_project(&self, id: &ProjectId) -> Result<Project, ProjectError> {
        self.repository.get(id).await?.ok_or(ProjectError::NotFound)
    }

    async fn create_project(&self, new: NewProject) -> Result<Project, ProjectError> {
        let project = Project::create(new, now())?;
        self.repository.insert(&project).await?;

        tracing::info!("Created new project: {} (ID: {})", project.name, project.id);
        Ok(project)
    }

    async fn update_project(
        &self,
        id: &ProjectId,
        patch: ProjectPatch,
    ) -> Result<Project, ProjectError> {
        let mut project = self.get_project(id).await?;
        project.apply(patch, now())?;
        self.repository.update(&project).await?;

        tracing::info!("Updated project: {} (ID: {})", project.name, project.id);
        Ok(project)
    }

    async fn delete_project(&self, id: &ProjectId) -> Result<(), ProjectError> {
        self.repository.delete(id).await?;

        tracing::info!("Deleted project with ID: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::{
        adapters::outbound::memory::InMemoryProjectRepository,
        domain::models::{Breakpoint, NAME_REQUIRED},
    };

    fn service() -> (
        ProjectServiceImpl<InMemoryProjectRepository>,
        Arc<InMemoryProjectRepository>,
    ) {
        let repo = Arc::new(InMemoryProjectRepository::new());
        (ProjectServiceImpl::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn create_assigns_unique_ids_and_defaults() {
        let (service, _) = service();

        let mut ids = HashSet::new();
        for i in 0..5 {
            let project = service
                .create_project(NewProject::named(format!("Project {i}")))
                .await
                .unwrap();

            assert!(ids.insert(project.id));
            assert_eq!(project.description, "");
            assert_eq!(project.video_url, "");
            assert_eq!(project.notes_text, "");
            assert!(project.breakpoints.is_empty());
            assert_eq!(project.created_at, project.updated_at);
        }
    }

    #[tokio::test]
    async fn create_without_name_persists_nothing() {
        let (service, repo) = service();

        for new in [
            NewProject::default(),
            NewProject::named(""),
            NewProject::named("   ").with_description("orphan"),
        ] {
            let err = service.create_project(new).await.unwrap_err();
            assert!(matches!(err, ProjectError::Validation(ref msg) if msg == NAME_REQUIRED));
        }

        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn breakpoints_round_trip_in_order() {
        let (service, _) = service();
        let breakpoints = vec![
            Breakpoint::new(42.0, "chorus"),
            Breakpoint::new(3.5, "intro"),
            Breakpoint::new(90.25, ""),
        ];

        let created = service
            .create_project(
                NewProject::named("Song")
                    .with_video_url("https://example.com/song.mp4")
                    .with_breakpoints(breakpoints.clone()),
            )
            .await
            .unwrap();
        let fetched = service.get_project(&created.id).await.unwrap();

        assert_eq!(fetched.breakpoints, breakpoints);
        assert_eq!(fetched.video_url, "https://example.com/song.mp4");
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn create_rejects_negative_breakpoint_time() {
        let (service, repo) = service();

        let err = service
            .create_project(
                NewProject::named("Bad").with_breakpoints(vec![Breakpoint::new(-1.0, "")]),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ProjectError::Validation(_)));
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let (service, _) = service();

        let x = service.create_project(NewProject::named("X")).await.unwrap();
        let y = service.create_project(NewProject::named("Y")).await.unwrap();
        let z = service.create_project(NewProject::named("Z")).await.unwrap();

        let ids = service
            .list_projects()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect::<Vec<_>>();

        assert_eq!(ids, vec![z.id, y.id, x.id]);
    }

    #[tokio::test]
    async fn update_is_a_partial_patch() {
        let (service, _) = service();
        let created = service
            .create_project(
                NewProject::named("A")
                    .with_description("A")
                    .with_breakpoints(vec![Breakpoint::new(1.0, "one")]),
            )
            .await
            .unwrap();

        let updated = service
            .update_project(
                &created.id,
                ProjectPatch {
                    name: Some("B".into()),
                    ..ProjectPatch::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "B");
        assert_eq!(updated.description, "A");
        assert_eq!(updated.breakpoints, created.breakpoints);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        let stored = service.get_project(&created.id).await.unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn update_accepts_explicit_empty_values() {
        let (service, _) = service();
        let created = service
            .create_project(
                NewProject::named("Full")
                    .with_notes_text("lots of notes")
                    .with_breakpoints(vec![Breakpoint::new(1.0, "")]),
            )
            .await
            .unwrap();

        let updated = service
            .update_project(
                &created.id,
                ProjectPatch {
                    notes_text: Some(String::new()),
                    breakpoints: Some(Vec::new()),
                    ..ProjectPatch::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.notes_text, "");
        assert!(updated.breakpoints.is_empty());
        assert_eq!(updated.name, "Full");
    }

    #[tokio::test]
    async fn update_with_blank_name_keeps_stored_project() {
        let (service, _) = service();
        let created = service.create_project(NewProject::named("Stay")).await.unwrap();

        let err = service
            .update_project(
                &created.id,
                ProjectPatch {
                    name: Some(" ".into()),
                    ..ProjectPatch::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ProjectError::Validation(_)));
        assert_eq!(service.get_project(&created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let (service, _) = service();
        let id = ProjectId::generate();

        assert!(matches!(
            service.get_project(&id).await,
            Err(ProjectError::NotFound)
        ));
        assert!(matches!(
            service.update_project(&id, ProjectPatch::default()).await,
            Err(ProjectError::NotFound)
        ));
        assert!(matches!(
            service.delete_project(&id).await,
            Err(ProjectError::NotFound)
        ));
    }

    #[tokio::test]
    async fn deleted_project_is_gone() {
        let (service, _) = service();
        let created = service.create_project(NewProject::named("Temp")).await.unwrap();

        service.delete_project(&created.id).await.unwrap();

        assert!(matches!(
            service.get_project(&created.id).await,
            Err(ProjectError::NotFound)
        ));
        assert!(service.list_projects().await.unwrap().is_empty());
    }
}
