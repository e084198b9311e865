use time::OffsetDateTime;

use super::ProjectId;
use crate::domain::ProjectError;

pub const NAME_REQUIRED: &str = "Project name is required";
pub const INVALID_BREAKPOINT_TIME: &str = "Breakpoint time must be a non-negative number";
pub const NUL_CHARACTER: &str = "Text fields must not contain NUL characters";

/// A timestamped annotation on a project's video timeline.
///
/// Breakpoints have no identity of their own; they live and die with the
/// project that owns them.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakpoint {
    /// Offset into the video, in seconds.
    pub time: f64,
    pub note: String,
}

impl Breakpoint {
    pub fn new(time: f64, note: impl Into<String>) -> Self {
        Self {
            time,
            note: note.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ProjectError> {
        if !self.time.is_finite() || self.time < 0.0 {
            return Err(ProjectError::validation(INVALID_BREAKPOINT_TIME));
        }
        reject_nul(Some(&self.note))
    }
}

/// A reading/annotation session over a video.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    pub video_url: String,
    /// Timeline order, as supplied by the caller.
    pub breakpoints: Vec<Breakpoint>,
    pub notes_text: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Fields for creating a project. Everything except `name` is optional.
#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub breakpoints: Option<Vec<Breakpoint>>,
    pub notes_text: Option<String>,
}

#[cfg(test)]
impl NewProject {
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

/// A partial update. `Some` fields overwrite the stored value (empty values
/// included), `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub breakpoints: Option<Vec<Breakpoint>>,
    pub notes_text: Option<String>,
}

impl Project {
    /// Validate `new` and build a project stamped with `now`.
    pub fn create(new: NewProject, now: OffsetDateTime) -> Result<Self, ProjectError> {
        reject_nul_fields(
            &new.name,
            &new.description,
            &new.video_url,
            &new.notes_text,
        )?;
        let name = normalize_name(new.name.as_deref())?;
        let breakpoints = new.breakpoints.unwrap_or_default();
        validate_breakpoints(&breakpoints)?;

        Ok(Self {
            id: ProjectId::generate(),
            name,
            description: new.description.unwrap_or_default().trim().to_string(),
            video_url: new.video_url.unwrap_or_default(),
            breakpoints,
            notes_text: new.notes_text.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply `patch` in place. Nothing is modified when validation fails.
    pub fn apply(&mut self, patch: ProjectPatch, now: OffsetDateTime) -> Result<(), ProjectError> {
        reject_nul_fields(
            &patch.name,
            &patch.description,
            &patch.video_url,
            &patch.notes_text,
        )?;
        let name = patch
            .name
            .as_deref()
            .map(|name| normalize_name(Some(name)))
            .transpose()?;
        if let Some(breakpoints) = &patch.breakpoints {
            validate_breakpoints(breakpoints)?;
        }

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description.trim().to_string();
        }
        if let Some(video_url) = patch.video_url {
            self.video_url = video_url;
        }
        if let Some(breakpoints) = patch.breakpoints {
            self.breakpoints = breakpoints;
        }
        if let Some(notes_text) = patch.notes_text {
            self.notes_text = notes_text;
        }
        self.updated_at = now;

        Ok(())
    }
}

fn normalize_name(name: Option<&str>) -> Result<String, ProjectError> {
    match name.map(str::trim) {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(ProjectError::validation(NAME_REQUIRED)),
    }
}

/// Postgres `TEXT` cannot store U+0000.
fn reject_nul(value: Option<&str>) -> Result<(), ProjectError> {
    match value {
        Some(value) if value.contains('\0') => Err(ProjectError::validation(NUL_CHARACTER)),
        _ => Ok(()),
    }
}

fn reject_nul_fields(
    name: &Option<String>,
    description: &Option<String>,
    video_url: &Option<String>,
    notes_text: &Option<String>,
) -> Result<(), ProjectError> {
    [name, description, video_url, notes_text]
        .into_iter()
        .try_for_each(|value| reject_nul(value.as_deref()))
}

fn validate_breakpoints(breakpoints: &[Breakpoint]) -> Result<(), ProjectError> {
    breakpoints.iter().try_for_each(Breakpoint::validate)
}
