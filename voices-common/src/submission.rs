//! Story submission orchestration
//!
//! One call to [`SubmissionService::submit`] takes a raw form post through
//! schema validation, the cross-field rules, record materialization and a
//! single store append. Pages that display stories are invalidated only
//! after the append succeeds.
//!
//! Nothing here raises past the service boundary: every outcome, including a
//! storage fault, comes back as a [`SubmissionResult`].

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::models::{FieldErrors, FormField, StoryRecord, SubmissionResult};
use crate::record::{generate_story_id, materialize_record};
use crate::rules::check_submission_rules;
use crate::store::StoryStore;
use crate::validation::{validate_fields, RawStoryForm};

/// Pages whose output depends on the story list
pub const STORY_PAGES: [&str; 3] = ["/", "/submit-story", "/student-stories"];

pub const VALIDATION_FAILED_MESSAGE: &str = "Validation failed. Please check your input.";
pub const SERVER_ERROR_MESSAGE: &str =
    "An unexpected error occurred while submitting your story. Please try again later.";
pub const SERVER_ERROR_FIELD_MESSAGE: &str = "Submission failed due to a server error.";

/// Receives "this page is stale" signals after a story is stored
pub trait PageInvalidator: Send + Sync {
    fn invalidate(&self, path: &str);
}

/// Validates, stores and acknowledges story submissions
#[derive(Clone)]
pub struct SubmissionService {
    store: StoryStore,
    invalidator: Arc<dyn PageInvalidator>,
}

impl SubmissionService {
    pub fn new(store: StoryStore, invalidator: Arc<dyn PageInvalidator>) -> Self {
        Self { store, invalidator }
    }

    pub fn store(&self) -> &StoryStore {
        &self.store
    }

    /// Handle one form post
    pub async fn submit(&self, form: &RawStoryForm) -> SubmissionResult {
        let validated = match validate_fields(form.normalize()) {
            Ok(validated) => validated,
            Err(errors) => {
                debug!("Story rejected by schema validation: {:?}", errors.fields().collect::<Vec<_>>());
                return SubmissionResult::rejected(VALIDATION_FAILED_MESSAGE, errors);
            }
        };

        if let Err(violation) = check_submission_rules(&validated) {
            debug!("Story rejected by rule on {}", violation.field.as_str());
            return SubmissionResult::rejected(violation.message, violation.field_errors());
        }

        let submitted_at = Utc::now();
        let record = materialize_record(validated, generate_story_id(submitted_at), submitted_at);

        if let Err(e) = self.store.append(&record).await {
            error!(
                "Error saving story {} to {} store: {}",
                record.id,
                self.store.backend_name(),
                e
            );
            return SubmissionResult::rejected(
                SERVER_ERROR_MESSAGE,
                FieldErrors::single(FormField::Form, SERVER_ERROR_FIELD_MESSAGE),
            );
        }

        info!(
            "Stored {} submission {} in '{}'",
            record.submission_type,
            record.id,
            self.store.collection()
        );

        for path in STORY_PAGES {
            self.invalidator.invalidate(path);
        }

        SubmissionResult::accepted(thank_you_message(&record))
    }
}

fn thank_you_message(record: &StoryRecord) -> String {
    let display_name = if record.is_anonymous {
        "Anonymous"
    } else {
        record.name.as_str()
    };

    format!(
        "Thank you, {}! Your {} has been submitted and will be reviewed before being displayed.",
        display_name,
        record.submission_type.story_noun()
    )
}
