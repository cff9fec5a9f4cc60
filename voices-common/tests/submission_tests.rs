//! End-to-end tests for the submission pipeline
//!
//! Runs raw form posts through `SubmissionService` backed by the in-memory
//! list store and a recording page invalidator.

use std::sync::{Arc, Mutex};

use voices_common::models::{FormField, StoryStatus, SubmissionType, ANONYMOUS_NAME, DEFAULT_AFFILIATION};
use voices_common::store::{ListStore, MemoryListStore, SqliteListStore, StoryStore, STORIES_COLLECTION};
use voices_common::submission::{PageInvalidator, SubmissionService, SERVER_ERROR_FIELD_MESSAGE, STORY_PAGES};
use voices_common::validation::RawStoryForm;

/// Invalidator that remembers every path it was told about
#[derive(Default)]
struct RecordingInvalidator {
    paths: Mutex<Vec<String>>,
}

impl RecordingInvalidator {
    fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

impl PageInvalidator for RecordingInvalidator {
    fn invalidate(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }
}

struct Harness {
    list: Arc<MemoryListStore>,
    invalidator: Arc<RecordingInvalidator>,
    service: SubmissionService,
}

fn harness() -> Harness {
    let list = Arc::new(MemoryListStore::new());
    let invalidator = Arc::new(RecordingInvalidator::default());
    let service = SubmissionService::new(StoryStore::new(list.clone()), invalidator.clone());
    Harness {
        list,
        invalidator,
        service,
    }
}

fn named(story: &str) -> RawStoryForm {
    RawStoryForm {
        story: Some(story.to_string()),
        name: Some("Marcus Chen".to_string()),
        submission_type: Some("text".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_story_length_boundaries() {
    let h = harness();

    for len in [9usize, 501] {
        let result = h.service.submit(&named(&"s".repeat(len))).await;
        assert!(!result.success, "length {} should be rejected", len);
        assert!(!result.field_errors(FormField::Story).is_empty());
    }

    for len in [10usize, 500] {
        let result = h.service.submit(&named(&"s".repeat(len))).await;
        assert!(result.success, "length {} should be accepted: {:?}", len, result);
    }

    assert_eq!(h.list.len(STORIES_COLLECTION).await, 2);
}

#[tokio::test]
async fn test_named_submission_requires_name() {
    let h = harness();

    for name in ["", "   ", "\t\n"] {
        let mut form = named("Loans made medical school possible for me.");
        form.name = Some(name.to_string());
        form.email = Some("valid@example.com".to_string());

        let result = h.service.submit(&form).await;
        assert!(!result.success);
        assert_eq!(
            result.field_errors(FormField::Name),
            ["Name is required when not submitting anonymously."]
        );
    }

    assert!(h.list.is_empty(STORIES_COLLECTION).await);
}

#[tokio::test]
async fn test_video_submission_requires_url() {
    let h = harness();
    let mut form = named("Watch my video about loans and residency.");
    form.submission_type = Some("video".to_string());
    form.video_url = Some(String::new());

    let result = h.service.submit(&form).await;
    assert!(!result.success);
    assert_eq!(
        result.field_errors(FormField::VideoUrl),
        ["Video URL is required for video submissions."]
    );
    assert_eq!(result.message.as_deref(), Some("Please provide a valid video URL."));
}

#[tokio::test]
async fn test_default_substitution_persisted() {
    let h = harness();
    let form = RawStoryForm {
        story: Some("Loans made medical school possible for me.".to_string()),
        is_anonymous: Some("on".to_string()),
        affiliation: Some(String::new()),
        ..Default::default()
    };

    let result = h.service.submit(&form).await;
    assert!(result.success);

    let stories = h.service.store().read_all().await.unwrap().stories;
    assert_eq!(stories[0].name, ANONYMOUS_NAME);
    assert_eq!(stories[0].affiliation, DEFAULT_AFFILIATION);
}

#[tokio::test]
async fn test_append_then_read_puts_new_record_first() {
    let h = harness();
    assert!(h.service.submit(&named("The first story in the list.")).await.success);
    assert!(h.service.submit(&named("The second story in the list.")).await.success);

    let mut form = named("Coming from a low-income family, this matters.");
    form.name = Some("Sofia Ramirez".to_string());
    form.affiliation = Some("MD-PhD Candidate".to_string());
    form.email = Some("sofia@example.com".to_string());
    assert!(h.service.submit(&form).await.success);

    let readout = h.service.store().read_all().await.unwrap();
    assert_eq!(readout.stories.len(), 3);
    assert_eq!(readout.skipped, 0);

    let newest = &readout.stories[0];
    assert_eq!(newest.quote, "Coming from a low-income family, this matters.");
    assert_eq!(newest.name, "Sofia Ramirez");
    assert_eq!(newest.affiliation, "MD-PhD Candidate");
    assert_eq!(newest.email, "sofia@example.com");
    assert_eq!(newest.submission_type, SubmissionType::Text);
    assert_eq!(readout.stories[1].quote, "The second story in the list.");
    assert_eq!(readout.stories[2].quote, "The first story in the list.");
}

#[tokio::test]
async fn test_corrupt_entry_skipped_on_read() {
    let h = harness();
    assert!(h.service.submit(&named("The first story in the list.")).await.success);
    h.list
        .push_front(STORIES_COLLECTION, "{\"id\": \"truncated".to_string())
        .await
        .unwrap();
    assert!(h.service.submit(&named("The second story in the list.")).await.success);

    let readout = h.service.store().read_all().await.unwrap();
    assert_eq!(readout.stories.len(), 2);
    assert_eq!(readout.skipped, 1);

    assert_eq!(h.service.store().all_submitted_stories().await.len(), 2);
}

#[tokio::test]
async fn test_anonymous_text_story_end_to_end() {
    let h = harness();
    let form = RawStoryForm {
        story: Some("Loans made medical school possible for me.".to_string()),
        is_anonymous: Some("on".to_string()),
        submission_type: Some("text".to_string()),
        ..Default::default()
    };

    let result = h.service.submit(&form).await;
    assert!(result.success);
    assert!(result.errors.is_none());
    assert_eq!(
        result.message.as_deref(),
        Some("Thank you, Anonymous! Your story has been submitted and will be reviewed before being displayed.")
    );

    let stories = h.service.store().all_submitted_stories().await;
    assert_eq!(stories.len(), 1);
    assert_eq!(stories[0].name, ANONYMOUS_NAME);
    assert_eq!(stories[0].status, StoryStatus::Pending);
    assert_eq!(stories[0].video_url, None);
    assert!(stories[0].is_anonymous);
    assert!(stories[0].id.starts_with("story-"));

    assert_eq!(h.invalidator.paths(), STORY_PAGES.map(String::from).to_vec());
}

#[tokio::test]
async fn test_short_story_rejected_without_side_effects() {
    let h = harness();
    let form = RawStoryForm {
        story: Some("hi".to_string()),
        name: Some("Jo".to_string()),
        ..Default::default()
    };

    let result = h.service.submit(&form).await;
    assert!(!result.success);
    assert_eq!(result.message.as_deref(), Some("Validation failed. Please check your input."));
    assert!(result.field_errors(FormField::Story)[0].contains("at least 10 characters"));

    assert!(h.list.is_empty(STORIES_COLLECTION).await);
    assert!(h.invalidator.paths().is_empty());
}

#[tokio::test]
async fn test_video_story_thank_you_names_submitter() {
    let h = harness();
    let mut form = named("A short description of my video message.");
    form.submission_type = Some("video".to_string());
    form.video_url = Some("https://youtube.com/watch?v=abc123".to_string());

    let result = h.service.submit(&form).await;
    assert!(result.success);
    assert_eq!(
        result.message.as_deref(),
        Some("Thank you, Marcus Chen! Your video story has been submitted and will be reviewed before being displayed.")
    );

    let stories = h.service.store().all_submitted_stories().await;
    assert_eq!(stories[0].video_url.as_deref(), Some("https://youtube.com/watch?v=abc123"));
}

#[tokio::test]
async fn test_storage_failure_reported_generically() {
    let h = harness();
    h.list.set_unavailable(true);

    let result = h.service.submit(&named("Loans made medical school possible for me.")).await;
    assert!(!result.success);
    assert!(result.is_server_fault());
    assert_eq!(result.field_errors(FormField::Form), [SERVER_ERROR_FIELD_MESSAGE]);
    assert!(h.invalidator.paths().is_empty());

    // Reads degrade to an empty list rather than failing the page
    assert!(h.service.store().all_submitted_stories().await.is_empty());
    assert!(h.service.store().read_all().await.is_err());
}

#[tokio::test]
async fn test_sqlite_backed_submission() {
    let dir = tempfile::tempdir().unwrap();
    let list = Arc::new(SqliteListStore::open(&dir.path().join("voices.db")).await.unwrap());
    let invalidator = Arc::new(RecordingInvalidator::default());
    let service = SubmissionService::new(StoryStore::new(list.clone()), invalidator.clone());

    assert!(service.submit(&named("Stored on disk through SQLite.")).await.success);
    list.push_front(STORIES_COLLECTION, "garbage".to_string()).await.unwrap();
    assert!(service.submit(&named("Second story stored on disk.")).await.success);

    let readout = service.store().read_all().await.unwrap();
    assert_eq!(readout.skipped, 1);
    assert_eq!(readout.stories.len(), 2);
    assert_eq!(readout.stories[0].quote, "Second story stored on disk.");
    assert_eq!(invalidator.paths().len(), STORY_PAGES.len() * 2);
}
