use async_trait::async_trait;
use serde::Deserialize;
use sqlx::{types::Json, PgConnection, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::{
    models::{Breakpoint, Project, ProjectId},
    ports::outbound::ProjectRepository,
    ProjectError,
};

/// Project columns plus its breakpoints aggregated in position order. Reading
/// both in one statement gives readers a single snapshot of the project.
const SELECT_PROJECTS: &str = r#"
    SELECT p.id, p.name, p.description, p.video_url, p.notes_text,
           p.created_at, p.updated_at,
           COALESCE(b.breakpoints, '[]'::json) AS breakpoints
    FROM projects p
    LEFT JOIN LATERAL (
        SELECT json_agg(
                   json_build_object('time', pb.time_seconds, 'note', pb.note)
                   ORDER BY pb.position
               ) AS breakpoints
        FROM project_breakpoints pb
        WHERE pb.project_id = p.id
    ) b ON TRUE
"#;

pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, Deserialize)]
struct StoredBreakpoint {
    time: f64,
    note: String,
}

#[derive(sqlx::FromRow)]
struct ProjectRow {
    id: Uuid,
    name: String,
    description: String,
    video_url: String,
    notes_text: String,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
    breakpoints: Json<Vec<StoredBreakpoint>>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: ProjectId::from(row.id),
            name: row.name,
            description: row.description,
            video_url: row.video_url,
            breakpoints: row
                .breakpoints
                .0
                .into_iter()
                .map(|stored| Breakpoint::new(stored.time, stored.note))
                .collect(),
            notes_text: row.notes_text,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn storage_error(err: sqlx::Error) -> ProjectError {
    ProjectError::Storage(err.to_string())
}

async fn insert_breakpoints(conn: &mut PgConnection, project: &Project) -> Result<(), sqlx::Error> {
    for (position, breakpoint) in project.breakpoints.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO project_breakpoints (project_id, position, time_seconds, note)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(project.id.as_uuid())
        .bind(position as i32)
        .bind(breakpoint.time)
        .bind(&breakpoint.note)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn list(&self) -> Result<Vec<Project>, ProjectError> {
        let query = format!("{SELECT_PROJECTS} ORDER BY p.created_at DESC, p.seq DESC");
        let rows = sqlx::query_as::<_, ProjectRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(rows.into_iter().map(Project::from).collect())
    }

    async fn get(&self, id: &ProjectId) -> Result<Option<Project>, ProjectError> {
        let query = format!("{SELECT_PROJECTS} WHERE p.id = $1");
        let row = sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(row.map(Project::from))
    }

    async fn insert(&self, project: &Project) -> Result<(), ProjectError> {
        let mut tx = self.pool.begin().await.map_err(storage_error)?;

        sqlx::query(
            r#"
            INSERT INTO projects (id, name, description, video_url, notes_text, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(project.id.as_uuid())
        .bind(&project.name)
        .bind(&project.description)
        .bind(&project.video_url)
        .bind(&project.notes_text)
        .bind(project.created_at)
        .bind(project.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(storage_error)?;

        insert_breakpoints(&mut *tx, project)
            .await
            .map_err(storage_error)?;

        tx.commit().await.map_err(storage_error)
    }

    async fn update(&self, project: &Project) -> Result<(), ProjectError> {
        let mut tx = self.pool.begin().await.map_err(storage_error)?;

        let query_result = sqlx::query(
            r#"
            UPDATE projects
            SET name = $2, description = $3, video_url = $4, notes_text = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(project.id.as_uuid())
        .bind(&project.name)
        .bind(&project.description)
        .bind(&project.video_url)
        .bind(&project.notes_text)
        .bind(project.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(storage_error)?;

        if query_result.rows_affected() == 0 {
            return Err(ProjectError::NotFound);
        }

        sqlx::query("DELETE FROM project_breakpoints WHERE project_id = $1")
            .bind(project.id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(storage_error)?;

        insert_breakpoints(&mut *tx, project)
            .await
            .map_err(storage_error)?;

        tx.commit().await.map_err(storage_error)
    }

    async fn delete(&self, id: &ProjectId) -> Result<(), ProjectError> {
        // Breakpoint rows go with it through ON DELETE CASCADE.
        let query_result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        if query_result.rows_affected() == 0 {
            return Err(ProjectError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::models::NewProject;

    fn project_named(name: &str, breakpoints: usize) -> NewProject {
        let breakpoints = (0..breakpoints)
            .map(|i| Breakpoint::new(i as f64, name))
            .collect();
        NewProject::named(name).with_breakpoints(breakpoints)
    }

    #[sqlx::test]
    #[ignore = "Requires a Postgres DATABASE_URL"]
    async fn round_trips_breakpoints_in_position_order(pool: PgPool) {
        let repo = PostgresProjectRepository::new(pool);
        let breakpoints = vec![
            Breakpoint::new(42.0, "chorus"),
            Breakpoint::new(3.5, "intro"),
            Breakpoint::new(90.25, ""),
        ];
        let project = Project::create(
            NewProject::named("Song").with_breakpoints(breakpoints.clone()),
            OffsetDateTime::UNIX_EPOCH,
        )
        .unwrap();

        repo.insert(&project).await.unwrap();

        let fetched = repo.get(&project.id).await.unwrap().unwrap();
        assert_eq!(fetched.breakpoints, breakpoints);
        assert_eq!(repo.list().await.unwrap(), vec![fetched]);
    }

    #[sqlx::test]
    #[ignore = "Requires a Postgres DATABASE_URL"]
    async fn reads_never_mix_two_versions_of_a_project(pool: PgPool) {
        let repo = Arc::new(PostgresProjectRepository::new(pool));
        let mut project =
            Project::create(project_named("v0", 1), OffsetDateTime::UNIX_EPOCH).unwrap();
        repo.insert(&project).await.unwrap();
        let id = project.id;

        let writer = {
            let repo = repo.clone();
            tokio::spawn(async move {
                for version in 1..200 {
                    let next = project_named(&format!("v{version}"), version % 4 + 1);
                    project.name = next.name.unwrap();
                    project.breakpoints = next.breakpoints.unwrap();
                    repo.update(&project).await.unwrap();
                }
            })
        };

        while !writer.is_finished() {
            let seen = repo.get(&id).await.unwrap().unwrap();
            let version: usize = seen.name[1..].parse().unwrap();
            assert_eq!(seen.breakpoints.len(), version % 4 + 1);
            assert!(seen.breakpoints.iter().all(|b| b.note == seen.name));

            for listed in repo.list().await.unwrap() {
                assert!(listed.breakpoints.iter().all(|b| b.note == listed.name));
            }
        }

        writer.await.unwrap();
    }
}
