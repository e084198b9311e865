use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub time: f64,
    #[serde(default)]
    pub note: String,
}

impl Breakpoint {
    pub fn new(time: f64, note: impl Into<String>) -> Self {
        Self {
            time,
            note: note.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub video_url: String,
    pub breakpoints: Vec<Breakpoint>,
    pub notes_text: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Body for create and update calls. Unset fields are left out of the JSON,
/// so on update they keep their stored values.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakpoints: Option<Vec<Breakpoint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes_text: Option<String>,
}

impl ProjectInput {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_video_url(mut self, video_url: impl Into<String>) -> Self {
        self.video_url = Some(video_url.into());
        self
    }

    pub fn with_breakpoints(mut self, breakpoints: Vec<Breakpoint>) -> Self {
        self.breakpoints = Some(breakpoints);
        self
    }

    pub fn with_notes_text(mut self, notes_text: impl Into<String>) -> Self {
        self.notes_text = Some(notes_text.into());
        self
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageBody {
    pub message: String,
}
