//! HTTP request bodies for the project endpoints.
//!
//! Every key is optional. For updates, an absent key leaves the stored field
//! alone while an explicit `null` resets it to its default (`""` or `[]`).
//! A `null` name resets to `""`, which then fails name validation.

use serde::Deserialize;

use crate::domain::models::{Breakpoint, NewProject, ProjectPatch};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPayload {
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub name: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub video_url: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub breakpoints: Option<Option<Vec<BreakpointPayload>>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub notes_text: Option<Option<String>>,
}

#[derive(Debug, Deserialize)]
pub struct BreakpointPayload {
    pub time: f64,
    #[serde(default)]
    pub note: Option<String>,
}

impl From<BreakpointPayload> for Breakpoint {
    fn from(payload: BreakpointPayload) -> Self {
        Breakpoint::new(payload.time, payload.note.unwrap_or_default())
    }
}

fn into_breakpoints(payload: Vec<BreakpointPayload>) -> Vec<Breakpoint> {
    payload.into_iter().map(Breakpoint::from).collect()
}

impl From<ProjectPayload> for NewProject {
    fn from(payload: ProjectPayload) -> Self {
        Self {
            name: payload.name.flatten(),
            description: payload.description.flatten(),
            video_url: payload.video_url.flatten(),
            breakpoints: payload.breakpoints.flatten().map(into_breakpoints),
            notes_text: payload.notes_text.flatten(),
        }
    }
}

impl From<ProjectPayload> for ProjectPatch {
    fn from(payload: ProjectPayload) -> Self {
        Self {
            name: payload.name.map(Option::unwrap_or_default),
            description: payload.description.map(Option::unwrap_or_default),
            video_url: payload.video_url.map(Option::unwrap_or_default),
            breakpoints: payload
                .breakpoints
                .map(|breakpoints| into_breakpoints(breakpoints.unwrap_or_default())),
            notes_text: payload.notes_text.map(Option::unwrap_or_default),
        }
    }
}
