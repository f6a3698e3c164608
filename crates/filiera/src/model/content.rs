//! Moderated content: certifications, listings and social posts awaiting a curator.

use crate::model::ContentId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Approval state. Items start `Pending` and move to exactly one terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentState {
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for ContentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ContentState::Pending => "pending",
            ContentState::Approved => "approved",
            ContentState::Rejected => "rejected",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Certification,
    Listing,
    Social,
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "certification" => Ok(ContentKind::Certification),
            "listing" => Ok(ContentKind::Listing),
            "social" => Ok(ContentKind::Social),
            other => Err(format!("unknown content kind: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ContentId,
    pub name: String,
    pub description: String,
    pub kind: ContentKind,
    pub submitted_by: Option<String>,
    pub state: ContentState,
}

/// Payload for submitting content for moderation.
#[derive(Debug, Clone)]
pub struct ContentSubmission {
    pub name: String,
    pub description: String,
    pub kind: ContentKind,
    pub submitted_by: Option<String>,
}

impl ContentSubmission {
    pub fn new(kind: ContentKind, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
            submitted_by: None,
        }
    }

    pub fn submitted_by(mut self, submitter: impl Into<String>) -> Self {
        self.submitted_by = Some(submitter.into());
        self
    }
}
