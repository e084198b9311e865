//! HTTP response types for the project endpoints.
//!
//! These types serialize to the JSON format expected by the frontend.

use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::models::{Breakpoint, Project};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub video_url: String,
    pub breakpoints: Vec<BreakpointResponse>,
    pub notes_text: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id.to_string(),
            name: project.name,
            description: project.description,
            video_url: project.video_url,
            breakpoints: project
                .breakpoints
                .into_iter()
                .map(BreakpointResponse::from)
                .collect(),
            notes_text: project.notes_text,
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BreakpointResponse {
    pub time: f64,
    pub note: String,
}

impl From<Breakpoint> for BreakpointResponse {
    fn from(breakpoint: Breakpoint) -> Self {
        Self {
            time: breakpoint.time,
            note: breakpoint.note,
        }
    }
}

/// Plain `{ "message": ... }` body for status and delete confirmations.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
