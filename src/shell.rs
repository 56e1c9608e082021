//! Presentation shell.
//!
//! Owns the view toggles and the display flags the walker reads, loads content once and runs
//! resume exports on request. The `folio` binary is its command-line front end.

pub mod view;

use std::sync::Arc;

use crate::animation::driver::DisplayFlags;
use crate::content::model::ContentDocument;
use crate::content::store::{ContentStore, LoadState};
use crate::export::resume::Variant;
use crate::export::{ExportedDocument, export_resume};
use crate::foundation::core::Canvas;
use crate::foundation::error::{FolioError, FolioResult};
use view::{ProjectFilter, Theme, ViewState};

#[derive(Debug)]
pub struct Shell {
    store: ContentStore,
    view: ViewState,
    flags: DisplayFlags,
}

impl Shell {
    pub fn new(store: ContentStore, viewport: Canvas, prefers_dark: bool) -> Self {
        let view = ViewState::new(prefers_dark);
        let flags = DisplayFlags::new(viewport, view.theme.is_dark());
        Self { store, view, flags }
    }

    /// Run the one-time content load.
    pub fn load(&mut self) -> &LoadState {
        self.store.load()
    }

    pub fn load_from_str(&mut self, json: &str) -> &LoadState {
        self.store.load_from_str(json)
    }

    pub fn is_ready(&self) -> bool {
        self.store.state().is_ready()
    }

    pub fn document(&self) -> Option<Arc<ContentDocument>> {
        self.store.document()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Flags to hand to the frame loop. Clones share state with the shell.
    pub fn flags(&self) -> DisplayFlags {
        self.flags.clone()
    }

    pub fn toggle_locale(&mut self) {
        let locale = self.view.toggle_locale();
        tracing::debug!(locale = %locale, "locale toggled");
    }

    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.view.toggle_theme();
        self.flags.set_dark(theme.is_dark());
        theme
    }

    pub fn set_filter(&mut self, filter: ProjectFilter) {
        self.view.set_filter(filter);
    }

    pub fn resize(&self, viewport: Canvas) {
        self.flags.set_viewport(viewport);
    }

    /// Export the resume in the current locale.
    pub fn export(&self, variant: Variant) -> FolioResult<ExportedDocument> {
        let doc = self
            .document()
            .ok_or_else(|| FolioError::content("content is still loading"))?;
        export_resume(&doc, self.view.locale, variant)
    }
}

#[cfg(test)]
#[path = "../tests/unit/shell/shell.rs"]
mod tests;
