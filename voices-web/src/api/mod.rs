//! HTTP handlers for voices-web

pub mod health;
pub mod pages;
pub mod stories;

pub use health::health_routes;
pub use pages::{home_page, student_stories_page, submit_story_form, submit_story_page};
pub use stories::submit_story;
