//! Staleness registry for server-rendered admin views.
//!
//! The SSR layer polls `GET /api/v1/views/stale`, re-renders whatever is
//! listed, and reports back through `POST /api/v1/views/refreshed`. Marking
//! is idempotent in effect: any number of marks leaves a path stale until
//! the renderer clears it.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;
use serde::Serialize;

use kasfolio_core::revalidation::ViewInvalidator;

#[derive(Clone, Debug)]
struct StaleEntry {
    /// Marks received since the path was last refreshed.
    generation: u64,
    marked_at: String,
}

/// One stale path as reported to the SSR layer.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StaleView {
    pub path: String,
    pub generation: u64,
    pub marked_at: String,
}

#[derive(Default)]
pub struct ViewCache {
    inner: Mutex<HashMap<String, StaleEntry>>,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears a path after its renderer refreshed it. Returns whether the
    /// path was actually stale.
    pub fn refreshed(&self, path: &str) -> bool {
        self.inner.lock().unwrap().remove(path).is_some()
    }

    /// Currently stale paths, ordered by path for stable output.
    pub fn snapshot(&self) -> Vec<StaleView> {
        let mut views: Vec<StaleView> = self
            .inner
            .lock()
            .unwrap()
            .iter()
            .map(|(path, entry)| StaleView {
                path: path.clone(),
                generation: entry.generation,
                marked_at: entry.marked_at.clone(),
            })
            .collect();
        views.sort_by(|a, b| a.path.cmp(&b.path));
        views
    }
}

impl ViewInvalidator for ViewCache {
    fn mark_stale(&self, path: &str) {
        let mut inner = self.inner.lock().unwrap();
        let now = Utc::now().to_rfc3339();
        inner
            .entry(path.to_string())
            .and_modify(|entry| {
                entry.generation += 1;
                entry.marked_at = now.clone();
            })
            .or_insert(StaleEntry {
                generation: 1,
                marked_at: now,
            });
    }
}
