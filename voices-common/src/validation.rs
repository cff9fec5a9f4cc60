//! Schema validation for story submissions
//!
//! Raw form posts are parsed exactly once into [`StoryFields`] by
//! [`RawStoryForm::normalize`], then checked field-by-field with `validator`.
//! Cross-field rules (name unless anonymous, URL for video) live in
//! [`crate::rules`].

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{FieldErrors, FormField, SubmissionType};

pub const STORY_MIN_CHARS: usize = 10;
pub const STORY_MAX_CHARS: usize = 500;

/// Checkbox value browsers post for a checked box
const CHECKBOX_ON: &str = "on";

/// Flat key/value bag exactly as posted by the submission form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStoryForm {
    #[serde(default)]
    pub story: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub affiliation: Option<String>,
    #[serde(default, rename = "isAnonymous")]
    pub is_anonymous: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "submissionType")]
    pub submission_type: Option<String>,
    #[serde(default, rename = "videoUrl")]
    pub video_url: Option<String>,
}

impl RawStoryForm {
    /// Anonymity follows the checkbox convention: set only when posted as "on"
    pub fn anonymous(&self) -> bool {
        self.is_anonymous.as_deref() == Some(CHECKBOX_ON)
    }

    /// Requested submission type string, defaulting to "text" when blank
    pub fn requested_type(&self) -> &str {
        match self.submission_type.as_deref() {
            Some(value) if !value.is_empty() => value,
            _ => SubmissionType::Text.as_str(),
        }
    }

    /// Parse the flat bag into typed fields ready for validation
    ///
    /// Blank optional inputs become `None`. The name is dropped for anonymous
    /// submissions and the video URL is only read in video mode.
    pub fn normalize(&self) -> StoryFields {
        let is_anonymous = self.anonymous();
        let submission_type = self.requested_type().to_string();
        let is_video = submission_type == SubmissionType::Video.as_str();

        StoryFields {
            story: self.story.clone().unwrap_or_default(),
            name: if is_anonymous { None } else { non_blank(&self.name) },
            affiliation: non_blank(&self.affiliation),
            is_anonymous,
            email: non_blank(&self.email),
            submission_type,
            video_url: if is_video { non_blank(&self.video_url) } else { None },
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

/// Typed submission fields with per-field constraints
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct StoryFields {
    #[validate(custom(function = "validate_story_length"))]
    pub story: String,

    #[validate(length(max = 100, message = "Name too long."))]
    pub name: Option<String>,

    #[validate(length(max = 150, message = "Affiliation too long."))]
    pub affiliation: Option<String>,

    pub is_anonymous: bool,

    #[validate(
        email(message = "Please enter a valid email address."),
        length(max = 100, message = "Email too long.")
    )]
    pub email: Option<String>,

    #[validate(custom(function = "validate_submission_type"))]
    pub submission_type: String,

    #[validate(url(message = "Please enter a valid URL."))]
    pub video_url: Option<String>,
}

/// Submission that passed schema validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedStory {
    pub story: String,
    pub name: Option<String>,
    pub affiliation: Option<String>,
    pub is_anonymous: bool,
    pub email: Option<String>,
    pub submission_type: SubmissionType,
    pub video_url: Option<String>,
}

fn validate_story_length(story: &str) -> Result<(), ValidationError> {
    let chars = story.chars().count();
    if chars < STORY_MIN_CHARS {
        return Err(message_error(
            "story_too_short",
            "Story must be at least 10 characters.",
        ));
    }
    if chars > STORY_MAX_CHARS {
        return Err(message_error(
            "story_too_long",
            "Story is too long (max 500 characters).",
        ));
    }
    Ok(())
}

fn validate_submission_type(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<SubmissionType>()
        .map(|_| ())
        .map_err(|_| {
            message_error(
                "invalid_submission_type",
                "Submission type must be 'text' or 'video'.",
            )
        })
}

fn message_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Validate typed fields, returning either the accepted values or
/// a field-to-messages map. Never panics on user input.
pub fn validate_fields(fields: StoryFields) -> Result<ValidatedStory, FieldErrors> {
    if let Err(errors) = fields.validate() {
        return Err(collect_field_errors(&errors));
    }

    // The custom validator above guarantees this parse succeeds
    let submission_type = fields
        .submission_type
        .parse::<SubmissionType>()
        .map_err(|e| FieldErrors::single(FormField::SubmissionType, e))?;

    Ok(ValidatedStory {
        story: fields.story,
        name: fields.name,
        affiliation: fields.affiliation,
        is_anonymous: fields.is_anonymous,
        email: fields.email,
        submission_type,
        video_url: fields.video_url,
    })
}

fn collect_field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut collected = FieldErrors::new();

    for (field, field_errors) in errors.field_errors() {
        let Ok(form_field) = field.to_string().parse::<FormField>() else {
            continue;
        };
        for error in field_errors.iter() {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid value ({})", error.code));
            collected.push(form_field, message);
        }
    }

    collected
}
