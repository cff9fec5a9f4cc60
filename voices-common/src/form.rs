//! Story submission form state machine
//!
//! Drives the submission form independently of how it is drawn:
//!
//! ```text
//! Idle ──submit──▶ Pending ──ok──▶ Success ──submit another──▶ Idle
//!                    │  ▲
//!                  error│
//!                    ▼  │resubmit
//!                  Failure
//! ```
//!
//! While `Pending`, further submits are refused. `Success` keeps the
//! thank-you panel up until the user asks for a fresh form. `Failure` keeps
//! whatever the user typed so only the flagged fields need fixing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{FormField, SubmissionResult, SubmissionType};
use crate::validation::RawStoryForm;

/// Where the form is in its submit cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    Pending,
    /// Thank-you panel showing; records which kind of story was sent
    Success { submitted: SubmissionType },
    Failure,
}

/// Toast-style message raised when a submission completes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub is_error: bool,
}

/// Snapshot of the form flags, as exposed to a view layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientFormState {
    pub mode: SubmissionType,
    pub anonymous: bool,
    pub pending: bool,
    pub last_result: Option<SubmissionResult>,
    pub show_success: bool,
}

/// Text the user has typed into the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub story: String,
    pub name: String,
    pub affiliation: String,
    pub email: String,
    pub video_url: String,
}

/// Transition requested in a phase that does not allow it
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    #[error("A submission is already in progress")]
    AlreadyPending,

    #[error("The thank-you panel is showing; start another submission first")]
    ShowingSuccess,

    #[error("No submission is in progress")]
    NotPending,
}

#[derive(Debug, Clone)]
pub struct StoryFormController {
    phase: SubmissionPhase,
    mode: SubmissionType,
    anonymous: bool,
    values: FormValues,
    last_result: Option<SubmissionResult>,
    notification: Option<Notification>,
}

impl Default for StoryFormController {
    fn default() -> Self {
        Self::new()
    }
}

impl StoryFormController {
    /// Fresh, empty form in text mode
    pub fn new() -> Self {
        Self {
            phase: SubmissionPhase::Idle,
            mode: SubmissionType::Text,
            anonymous: false,
            values: FormValues::default(),
            last_result: None,
            notification: None,
        }
    }

    /// Form pre-filled with values and flags, e.g. from a re-posted page
    pub fn with_values(mode: SubmissionType, anonymous: bool, values: FormValues) -> Self {
        Self {
            mode,
            anonymous,
            values,
            ..Self::new()
        }
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn mode(&self) -> SubmissionType {
        self.mode
    }

    pub fn is_anonymous(&self) -> bool {
        self.anonymous
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn last_result(&self) -> Option<&SubmissionResult> {
        self.last_result.as_ref()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn state(&self) -> ClientFormState {
        ClientFormState {
            mode: self.mode,
            anonymous: self.anonymous,
            pending: self.phase == SubmissionPhase::Pending,
            last_result: self.last_result.clone(),
            show_success: matches!(self.phase, SubmissionPhase::Success { .. }),
        }
    }

    /// Submit control is enabled only when a submit would be accepted
    pub fn can_submit(&self) -> bool {
        matches!(self.phase, SubmissionPhase::Idle | SubmissionPhase::Failure)
    }

    /// Switch between text and video; never triggers validation
    pub fn set_mode(&mut self, mode: SubmissionType) {
        self.mode = mode;
    }

    pub fn set_anonymous(&mut self, anonymous: bool) {
        self.anonymous = anonymous;
    }

    /// Record typed text for one input
    pub fn set_value(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Story => self.values.story = value,
            FormField::Name => self.values.name = value,
            FormField::Affiliation => self.values.affiliation = value,
            FormField::Email => self.values.email = value,
            FormField::VideoUrl => self.values.video_url = value,
            FormField::SubmissionType | FormField::Form => {}
        }
    }

    /// Inputs shown for the current mode and anonymity flag
    pub fn visible_fields(&self) -> Vec<FormField> {
        let mut fields = vec![FormField::SubmissionType, FormField::Story];
        if self.mode == SubmissionType::Video {
            fields.push(FormField::VideoUrl);
        }
        if !self.anonymous {
            fields.push(FormField::Name);
        }
        fields.push(FormField::Affiliation);
        fields.push(FormField::Email);
        fields
    }

    /// Whether the browser should mark `field` as required
    pub fn is_required(&self, field: FormField) -> bool {
        match field {
            FormField::Story | FormField::SubmissionType => true,
            FormField::VideoUrl => self.mode == SubmissionType::Video,
            FormField::Name => !self.anonymous,
            FormField::Affiliation | FormField::Email | FormField::Form => false,
        }
    }

    /// Annotation to show next to `field` after a failed submit
    pub fn field_error(&self, field: FormField) -> Option<&str> {
        if self.phase != SubmissionPhase::Failure {
            return None;
        }
        self.last_result
            .as_ref()
            .and_then(|result| result.errors.as_ref())
            .and_then(|errors| errors.first(field))
    }

    /// Move to `Pending` and return the field bag to post
    pub fn begin_submit(&mut self) -> Result<RawStoryForm, FormError> {
        match self.phase {
            SubmissionPhase::Pending => return Err(FormError::AlreadyPending),
            SubmissionPhase::Success { .. } => return Err(FormError::ShowingSuccess),
            SubmissionPhase::Idle | SubmissionPhase::Failure => {}
        }

        self.phase = SubmissionPhase::Pending;
        self.notification = None;
        Ok(self.field_bag())
    }

    /// Apply the server's answer to a pending submit
    pub fn complete(&mut self, result: SubmissionResult) -> Result<&Notification, FormError> {
        if self.phase != SubmissionPhase::Pending {
            return Err(FormError::NotPending);
        }

        let description = result.message.clone().unwrap_or_default();
        let notification = if result.success {
            let submitted = self.mode;
            self.values = FormValues::default();
            self.mode = SubmissionType::Text;
            self.anonymous = false;
            self.phase = SubmissionPhase::Success { submitted };
            Notification {
                title: "Success!".to_string(),
                description,
                is_error: false,
            }
        } else {
            self.phase = SubmissionPhase::Failure;
            Notification {
                title: "Error".to_string(),
                description,
                is_error: true,
            }
        };

        self.last_result = Some(result);
        Ok(self.notification.insert(notification))
    }

    /// Leave the thank-you panel for a fresh, empty form
    pub fn submit_another(&mut self) {
        *self = Self::new();
    }

    fn field_bag(&self) -> RawStoryForm {
        let is_video = self.mode == SubmissionType::Video;
        RawStoryForm {
            story: Some(self.values.story.clone()),
            name: (!self.anonymous).then(|| self.values.name.clone()),
            affiliation: Some(self.values.affiliation.clone()),
            is_anonymous: self.anonymous.then(|| "on".to_string()),
            email: Some(self.values.email.clone()),
            submission_type: Some(self.mode.as_str().to_string()),
            video_url: is_video.then(|| self.values.video_url.clone()),
        }
    }
}
