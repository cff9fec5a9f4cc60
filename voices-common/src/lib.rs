//! # Student Voices Common Library
//!
//! Shared code for the story submission service:
//! - Story data model and wire types
//! - Schema validation and cross-field submission rules
//! - List store abstraction (SQLite and in-memory backends)
//! - Submission orchestration
//! - Client form state machine
//! - Configuration loading

pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod record;
pub mod rules;
pub mod store;
pub mod submission;
pub mod validation;

pub use error::{Error, Result};
pub use models::{FieldErrors, FormField, StoryRecord, StoryStatus, SubmissionResult, SubmissionType};
