//! Cross-field submission rules
//!
//! Checked in order after schema validation. The first failing rule is the
//! only one reported.

use crate::models::{FieldErrors, FormField, SubmissionType};
use crate::validation::ValidatedStory;

/// Minimum trimmed length of a display name
pub const NAME_MIN_CHARS: usize = 2;

/// A failed business rule, scoped to one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleViolation {
    pub field: FormField,
    /// Inline annotation for the field
    pub error: &'static str,
    /// Notification text for the whole form
    pub message: &'static str,
}

impl RuleViolation {
    pub fn field_errors(&self) -> FieldErrors {
        FieldErrors::single(self.field, self.error)
    }
}

/// Apply the name and video rules to schema-valid input
pub fn check_submission_rules(story: &ValidatedStory) -> Result<(), RuleViolation> {
    if !story.is_anonymous {
        let name_ok = story
            .name
            .as_deref()
            .map(str::trim)
            .is_some_and(|name| name.chars().count() >= NAME_MIN_CHARS);

        if !name_ok {
            return Err(RuleViolation {
                field: FormField::Name,
                error: "Name is required when not submitting anonymously.",
                message: "Please provide your name or choose to submit anonymously.",
            });
        }
    }

    if story.submission_type == SubmissionType::Video {
        let url_ok = story
            .video_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty());

        if !url_ok {
            return Err(RuleViolation {
                field: FormField::VideoUrl,
                error: "Video URL is required for video submissions.",
                message: "Please provide a valid video URL.",
            });
        }
    }

    Ok(())
}
