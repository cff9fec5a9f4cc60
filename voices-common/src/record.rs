//! Story record materialization
//!
//! Every default substitution applied to a submission happens here, in
//! one place, before the record is written.

use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::models::{StoryRecord, StoryStatus, ANONYMOUS_NAME, DEFAULT_AFFILIATION};
use crate::validation::ValidatedStory;

const ID_SUFFIX_LEN: usize = 9;

/// Build a story id from the creation time plus a random base-36 suffix
///
/// Unique in practice, not guaranteed: two ids minted in the same
/// millisecond collide only if their 9-character suffixes match.
pub fn generate_story_id(created_at: DateTime<Utc>) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .filter(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
        .take(ID_SUFFIX_LEN)
        .map(char::from)
        .collect();

    format!("story-{}-{}", created_at.timestamp_millis(), suffix)
}

/// Turn validated input into the immutable record that gets stored
pub fn materialize_record(
    story: ValidatedStory,
    id: String,
    submitted_at: DateTime<Utc>,
) -> StoryRecord {
    let name = match (story.is_anonymous, story.name) {
        (false, Some(name)) if !name.is_empty() => name,
        _ => ANONYMOUS_NAME.to_string(),
    };

    StoryRecord {
        id,
        quote: story.story,
        name,
        affiliation: story
            .affiliation
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| DEFAULT_AFFILIATION.to_string()),
        is_anonymous: story.is_anonymous,
        email: story.email.unwrap_or_default(),
        submission_type: story.submission_type,
        video_url: story.video_url.filter(|u| !u.is_empty()),
        submitted_at,
        status: StoryStatus::Pending,
    }
}
