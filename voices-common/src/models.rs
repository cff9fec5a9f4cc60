//! Story data model and submission wire types
//!
//! `StoryRecord` is the persisted, immutable shape stored in the story list.
//! `SubmissionResult` is what every submission attempt returns to the client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Display name substituted for anonymous or nameless submissions
pub const ANONYMOUS_NAME: &str = "Anonymous Student";

/// Affiliation substituted when the submitter leaves it blank
pub const DEFAULT_AFFILIATION: &str = "Medical Student";

/// Kind of story being shared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionType {
    #[default]
    Text,
    Video,
}

impl SubmissionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionType::Text => "text",
            SubmissionType::Video => "video",
        }
    }

    /// Noun used in user-facing copy ("story" / "video story")
    pub fn story_noun(&self) -> &'static str {
        match self {
            SubmissionType::Text => "story",
            SubmissionType::Video => "video story",
        }
    }
}

impl fmt::Display for SubmissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmissionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(SubmissionType::Text),
            "video" => Ok(SubmissionType::Video),
            other => Err(format!("Unknown submission type: {}", other)),
        }
    }
}

/// Moderation state of a stored story
///
/// Records are always created as `Pending`. The other states are only ever
/// written by the external moderation process; they exist so those records
/// still deserialize on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    /// Any status this service does not know; re-serializes as `"other"`
    #[serde(other)]
    Other,
}

/// Persisted story entry in the `student_stories` list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryRecord {
    pub id: String,
    pub quote: String,
    pub name: String,
    pub affiliation: String,
    pub is_anonymous: bool,
    /// Contact address for follow-up; never rendered publicly
    pub email: String,
    pub submission_type: SubmissionType,
    pub video_url: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub status: StoryStatus,
}

/// Form field an error is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FormField {
    #[serde(rename = "story")]
    Story,
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "affiliation")]
    Affiliation,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "submissionType")]
    SubmissionType,
    #[serde(rename = "videoUrl")]
    VideoUrl,
    /// Form-level error not tied to a single input
    #[serde(rename = "_form")]
    Form,
}

impl FormField {
    /// Wire name, as used in form posts and error payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Story => "story",
            FormField::Name => "name",
            FormField::Affiliation => "affiliation",
            FormField::Email => "email",
            FormField::SubmissionType => "submissionType",
            FormField::VideoUrl => "videoUrl",
            FormField::Form => "_form",
        }
    }
}

impl FromStr for FormField {
    type Err = String;

    /// Accepts both wire names and Rust field names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "story" => Ok(FormField::Story),
            "name" => Ok(FormField::Name),
            "affiliation" => Ok(FormField::Affiliation),
            "email" => Ok(FormField::Email),
            "submissionType" | "submission_type" => Ok(FormField::SubmissionType),
            "videoUrl" | "video_url" => Ok(FormField::VideoUrl),
            "_form" => Ok(FormField::Form),
            other => Err(format!("Unknown form field: {}", other)),
        }
    }
}

/// Ordered violation messages per field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<FormField, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors map holding a single message for one field
    pub fn single(field: FormField, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: FormField, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn get(&self, field: FormField) -> Option<&[String]> {
        self.0.get(&field).map(Vec::as_slice)
    }

    /// First message for a field, used for inline annotations
    pub fn first(&self, field: FormField) -> Option<&str> {
        self.get(field).and_then(|messages| messages.first()).map(String::as_str)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.0.keys().copied()
    }
}

/// Outcome of one submission attempt, as returned to the client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub success: bool,
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl SubmissionResult {
    pub fn accepted(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            errors: None,
        }
    }

    pub fn rejected(message: impl Into<String>, errors: FieldErrors) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            errors: Some(errors),
        }
    }

    /// Error messages for one field, empty when none
    pub fn field_errors(&self, field: FormField) -> &[String] {
        self.errors
            .as_ref()
            .and_then(|errors| errors.get(field))
            .unwrap_or(&[])
    }

    /// True when the failure was an infrastructure fault rather than user input
    pub fn is_server_fault(&self) -> bool {
        !self.success
            && self
                .errors
                .as_ref()
                .is_some_and(|errors| errors.contains(FormField::Form))
    }
}
