use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{
    adapters::inbound::http::{MessageResponse, ProjectPayload, ProjectResponse},
    app_state::AppState,
    domain::{models::ProjectId, ProjectError},
    routes::{error::INVALID_PROJECT_ID, ApiError},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route(
            "/:id",
            get(get_project).put(update_project).delete(delete_project),
        )
}

fn failure(app_state: &AppState, message: &'static str) -> impl Fn(ProjectError) -> ApiError {
    let details = app_state.error_details;
    move |err| ApiError::from_project_error(err, message, details)
}

fn parse_id(raw: &str) -> Result<ProjectId, ApiError> {
    raw.parse().map_err(|_| {
        tracing::info!("Invalid project ID: {}", raw);
        ApiError::bad_request(INVALID_PROJECT_ID)
    })
}

#[instrument(name = "GET /api/projects", skip(app_state))]
async fn list_projects(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<ProjectResponse>>, ApiError> {
    let projects = app_state
        .project_service
        .list_projects()
        .await
        .map_err(failure(&app_state, "Failed to retrieve projects"))?;

    tracing::info!("Found {} projects", projects.len());
    Ok(Json(
        projects.into_iter().map(ProjectResponse::from).collect(),
    ))
}

#[instrument(name = "GET /api/projects/:id", skip(app_state))]
async fn get_project(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let id = parse_id(&id)?;

    let project = app_state
        .project_service
        .get_project(&id)
        .await
        .map_err(failure(&app_state, "Failed to retrieve project"))?;

    Ok(Json(project.into()))
}

#[instrument(name = "POST /api/projects", skip(app_state, payload))]
async fn create_project(
    State(app_state): State<AppState>,
    payload: Result<Json<ProjectPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<ProjectResponse>), ApiError> {
    let Json(payload) = payload?;
    tracing::debug!("Request body: {:?}", payload);

    let project = app_state
        .project_service
        .create_project(payload.into())
        .await
        .map_err(failure(&app_state, "Failed to create project"))?;

    Ok((StatusCode::CREATED, Json(project.into())))
}

#[instrument(name = "PUT /api/projects/:id", skip(app_state, payload))]
async fn update_project(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProjectPayload>, JsonRejection>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let id = parse_id(&id)?;
    let Json(payload) = payload?;
    tracing::debug!("Request body: {:?}", payload);

    let project = app_state
        .project_service
        .update_project(&id, payload.into())
        .await
        .map_err(failure(&app_state, "Failed to update project"))?;

    Ok(Json(project.into()))
}

#[instrument(name = "DELETE /api/projects/:id", skip(app_state))]
async fn delete_project(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id)?;

    app_state
        .project_service
        .delete_project(&id)
        .await
        .map_err(failure(&app_state, "Failed to delete project"))?;

    Ok(Json(MessageResponse::new("Project deleted successfully")))
}
