//! JSON story submission endpoint

use axum::{extract::State, http::StatusCode, Form, Json};
use voices_common::validation::RawStoryForm;
use voices_common::SubmissionResult;

use crate::AppState;

/// POST /api/stories
///
/// Accepts the urlencoded submission form and answers with a
/// `SubmissionResult`. Rejected input is still a 200 with field errors;
/// only a storage fault maps to 500.
pub async fn submit_story(
    State(state): State<AppState>,
    Form(form): Form<RawStoryForm>,
) -> (StatusCode, Json<SubmissionResult>) {
    let result = state.service.submit(&form).await;

    let status = if result.is_server_fault() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    };

    (status, Json(result))
}
