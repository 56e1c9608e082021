use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::content::model::ContentDocument;
use crate::foundation::error::FolioResult;

/// Fixed relative path of the content document.
pub const DEFAULT_CONTENT_PATH: &str = "data.json";

/// Observable state of the one-time content load.
#[derive(Clone, Debug)]
pub enum LoadState {
    /// Not loaded yet, or the load failed. Failures never leave this state.
    Loading,
    Ready(Arc<ContentDocument>),
}

impl LoadState {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready(_))
    }
}

/// Holds the content document once it has loaded.
///
/// Load failures are logged and leave the store in [`LoadState::Loading`] for good: there is no
/// retry and nothing partial is exposed.
#[derive(Debug)]
pub struct ContentStore {
    source: PathBuf,
    state: LoadState,
    attempted: bool,
}

impl ContentStore {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            state: LoadState::Loading,
            attempted: false,
        }
    }

    /// Store pointing at [`DEFAULT_CONTENT_PATH`] under `root`.
    pub fn at_root(root: impl AsRef<Path>) -> Self {
        Self::new(root.as_ref().join(DEFAULT_CONTENT_PATH))
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Snapshot of the loaded document, if any.
    pub fn document(&self) -> Option<Arc<ContentDocument>> {
        match &self.state {
            LoadState::Ready(doc) => Some(Arc::clone(doc)),
            LoadState::Loading => None,
        }
    }

    /// Run the one-time load. Later calls return the current state without touching disk.
    #[tracing::instrument(skip(self), fields(source = %self.source.display()))]
    pub fn load(&mut self) -> &LoadState {
        if self.attempted {
            return &self.state;
        }
        self.attempted = true;
        self.settle(ContentDocument::from_path(&self.source))
    }

    /// Same as [`ContentStore::load`] but from an in-memory JSON string.
    pub fn load_from_str(&mut self, json: &str) -> &LoadState {
        if self.attempted {
            return &self.state;
        }
        self.attempted = true;
        let parsed = ContentDocument::from_json_str(json).and_then(|doc| {
            doc.validate()?;
            Ok(doc)
        });
        self.settle(parsed)
    }

    fn settle(&mut self, result: FolioResult<ContentDocument>) -> &LoadState {
        match result {
            Ok(doc) => {
                tracing::info!(
                    history = doc.history.len(),
                    projects = doc.projects.len(),
                    publications = doc.publications.len(),
                    "content loaded"
                );
                self.state = LoadState::Ready(Arc::new(doc));
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to load content");
            }
        }
        &self.state
    }
}

#[cfg(test)]
#[path = "../../tests/unit/content/store.rs"]
mod tests;
