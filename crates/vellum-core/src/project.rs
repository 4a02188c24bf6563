//! Saved project files.
//!
//! A project is `{ name, elements, timestamp }` as pretty-printed JSON. The
//! store itself only ever sees the `elements` array.

use crate::element::Element;
use crate::store::DocumentStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default name for exported projects.
pub const DEFAULT_PROJECT_NAME: &str = "design-export";

/// Project file errors.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Invalid project JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A serialized design document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    pub name: String,
    pub elements: Vec<Element>,
    /// When the file was written (RFC 3339). Files without one are stamped
    /// with the time they were read.
    #[serde(alias = "exportedAt", alias = "lastModified", default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl ProjectFile {
    /// Create a project stamped with the current time.
    pub fn new(name: impl Into<String>, elements: Vec<Element>) -> Self {
        Self {
            name: name.into(),
            elements,
            timestamp: Utc::now(),
        }
    }

    /// Capture the store's current elements.
    pub fn from_store(name: impl Into<String>, store: &DocumentStore) -> Self {
        Self::new(name, store.elements().to_vec())
    }

    /// File name to offer when exporting: the name lowercased with
    /// whitespace runs turned into dashes, e.g. `untitled-project.json`.
    pub fn file_name(&self) -> String {
        let slug = self
            .name
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("-");
        if slug.is_empty() {
            format!("{}.json", DEFAULT_PROJECT_NAME)
        } else {
            format!("{}.json", slug)
        }
    }

    /// Serialize the project to JSON.
    pub fn to_json(&self) -> Result<String, ProjectError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize a project from JSON.
    pub fn from_json(json: &str) -> Result<Self, ProjectError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl DocumentStore {
    /// Replace the document with a project's elements.
    pub fn open_project(&mut self, project: ProjectFile) {
        log::info!(
            "opening project {:?} ({} elements, saved {})",
            project.name,
            project.elements.len(),
            project.timestamp.to_rfc3339()
        );
        self.load_project(project.elements);
    }
}
