//! voices-web library - student story pages and submission endpoints
//!
//! Serves the campaign pages with the student voices marquee, the story
//! submission form, and a JSON submission API backed by the story store.

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use voices_common::store::{ListStore, StoryStore};
use voices_common::submission::SubmissionService;

pub mod api;
pub mod cache;
pub mod curated;
pub mod html;
pub mod marquee;

use cache::PageCache;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Submission pipeline over the story store
    pub service: SubmissionService,
    /// Rendered pages, invalidated by successful submissions
    pub cache: Arc<PageCache>,
}

impl AppState {
    /// Wire the submission service to a fresh page cache over `list`
    pub fn new(list: Arc<dyn ListStore>) -> Self {
        let cache = Arc::new(PageCache::new());
        let service = SubmissionService::new(StoryStore::new(list), cache.clone());
        Self { service, cache }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let pages = Router::new()
        .route("/", get(api::home_page))
        .route("/student-stories", get(api::student_stories_page))
        .route(
            "/submit-story",
            get(api::submit_story_page).post(api::submit_story_form),
        );

    let json = Router::new().route("/api/stories", post(api::submit_story));

    Router::new()
        .merge(pages)
        .merge(json)
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
