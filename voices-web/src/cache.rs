//! Rendered page cache
//!
//! Pages are rendered once and served from memory until something marks
//! them stale. A successful story submission invalidates every page that
//! shows stories, so the next request re-renders it.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;
use voices_common::submission::PageInvalidator;

#[derive(Debug, Clone)]
struct CachedPage {
    html: String,
    rendered_at: DateTime<Utc>,
    stale: bool,
}

#[derive(Debug, Default)]
pub struct PageCache {
    pages: RwLock<HashMap<String, CachedPage>>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve the cached page for `path`, rendering it first if missing or stale
    ///
    /// Rendering happens outside the lock; two concurrent misses may both
    /// render, and the last one wins.
    pub fn get_or_render<F>(&self, path: &str, render: F) -> String
    where
        F: FnOnce() -> String,
    {
        if let Some(html) = self.fresh(path) {
            return html;
        }

        let html = render();
        let mut pages = self.pages.write().unwrap_or_else(|e| e.into_inner());
        pages.insert(
            path.to_string(),
            CachedPage {
                html: html.clone(),
                rendered_at: Utc::now(),
                stale: false,
            },
        );
        debug!("Rendered page {}", path);
        html
    }

    /// Cached output for `path` if present and not stale
    pub fn fresh(&self, path: &str) -> Option<String> {
        let pages = self.pages.read().unwrap_or_else(|e| e.into_inner());
        pages
            .get(path)
            .filter(|page| !page.stale)
            .map(|page| page.html.clone())
    }

    /// When `path` was last rendered, if it ever was
    pub fn rendered_at(&self, path: &str) -> Option<DateTime<Utc>> {
        let pages = self.pages.read().unwrap_or_else(|e| e.into_inner());
        pages.get(path).map(|page| page.rendered_at)
    }

    /// Mark `path` stale; the next request re-renders it
    pub fn mark_stale(&self, path: &str) {
        let mut pages = self.pages.write().unwrap_or_else(|e| e.into_inner());
        if let Some(page) = pages.get_mut(path) {
            page.stale = true;
            debug!("Invalidated page {}", path);
        }
    }
}

impl PageInvalidator for PageCache {
    fn invalidate(&self, path: &str) {
        self.mark_stale(path);
    }
}
