//! Downloadable JSON snapshot of a finished plan.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Feature, ProjectSetup, Session, TechStackItem, TimelineItem};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExportError {
    #[error("project setup has not been submitted")]
    MissingSetup,
}

/// The export document. Only selected features and technologies are
/// included.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanExport {
    pub project: ProjectSetup,
    pub features: Vec<Feature>,
    pub technologies: Vec<TechStackItem>,
    pub timeline: Vec<TimelineItem>,
    /// RFC 3339 UTC timestamp with millisecond precision.
    pub generated_at: String,
}

impl PlanExport {
    /// Snapshots `session` without modifying it.
    pub fn from_session(session: &Session, now: DateTime<Utc>) -> Result<Self, ExportError> {
        let project = session.setup.clone().ok_or(ExportError::MissingSetup)?;

        Ok(Self {
            project,
            features: session.selected_features(),
            technologies: session.selected_tech_stack(),
            timeline: session.timeline.clone(),
            generated_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }

    /// `<name>_project_plan.json`, with each run of whitespace in the
    /// project name replaced by a single underscore. Path separators become
    /// underscores too, so the result is always a single path component.
    pub fn file_name(&self) -> String {
        let mut stem = String::with_capacity(self.project.name.len());
        let mut in_space = false;
        for c in self.project.name.chars() {
            if c.is_whitespace() {
                if !in_space {
                    stem.push('_');
                }
                in_space = true;
            } else {
                stem.push(if matches!(c, '/' | '\\') { '_' } else { c });
                in_space = false;
            }
        }
        format!("{}_project_plan.json", stem)
    }

    /// Pretty-printed JSON bytes of the document.
    pub fn to_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
    }
}
