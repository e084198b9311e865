use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

use crate::domain::ProjectError;

/// A validated project identifier.
///
/// Wraps a UUID to match the `projects.id` column. Parsing is the only
/// way to turn caller-supplied text into an id, so every lookup goes
/// through the same validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(Uuid);

impl ProjectId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProjectId {
    type Err = ProjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| ProjectError::InvalidIdentifier(s.to_string()))
    }
}

impl From<Uuid> for ProjectId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_generated_id() {
        let id = ProjectId::generate();
        let parsed: ProjectId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn parses_uppercase_and_simple_forms() {
        let hyphenated: ProjectId = "67E55044-10B1-426F-9247-BB680E5FE0C8".parse().unwrap();
        let simple: ProjectId = "67e5504410b1426f9247bb680e5fe0c8".parse().unwrap();
        assert_eq!(hyphenated, simple);
    }

    #[test]
    fn rejects_malformed_ids() {
        for raw in ["", "abc", "507f1f77bcf86cd799439011", "not-a-uuid-at-all-0000000000000"] {
            let err = raw.parse::<ProjectId>().unwrap_err();
            assert!(matches!(err, ProjectError::InvalidIdentifier(ref s) if s == raw));
        }
    }
}
