//! Resume export: paginated layout plus PDF serialization.
//!
//! [`export_resume`] is synchronous and stateless. It borrows the content document, lays it out
//! with a threaded cursor ([`layout::Cursor`]) and serializes the result.

pub mod layout;
pub mod metrics;
pub mod pdf;
pub mod resume;

use crate::content::model::{ContentDocument, Locale};
use crate::foundation::error::FolioResult;
use layout::PageGeometry;
use metrics::HelveticaMetrics;
use resume::Variant;
use std::path::{Path, PathBuf};

/// A finished PDF and the file name it should be saved under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub pages: usize,
}

impl ExportedDocument {
    /// Write into `dir` under [`ExportedDocument::file_name`].
    pub fn write_to_dir(&self, dir: &Path) -> FolioResult<PathBuf> {
        use anyhow::Context as _;
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create output dir '{}'", dir.display()))?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)
            .with_context(|| format!("write '{}'", path.display()))?;
        Ok(path)
    }
}

/// Export with the default A4 geometry.
pub fn export_resume(
    doc: &ContentDocument,
    locale: Locale,
    variant: Variant,
) -> FolioResult<ExportedDocument> {
    export_resume_with(doc, locale, variant, &PageGeometry::default())
}

#[tracing::instrument(skip(doc, geometry), fields(name = %doc.profile.name))]
pub fn export_resume_with(
    doc: &ContentDocument,
    locale: Locale,
    variant: Variant,
    geometry: &PageGeometry,
) -> FolioResult<ExportedDocument> {
    geometry.validate()?;
    let laid_out = resume::layout_resume(doc, locale, variant, geometry, &HelveticaMetrics);
    let bytes = pdf::write_pdf(&laid_out, &doc.profile.name)?;
    tracing::info!(
        file = variant.file_name(),
        pages = laid_out.page_count(),
        bytes = bytes.len(),
        "resume exported"
    );
    Ok(ExportedDocument {
        file_name: variant.file_name().to_string(),
        bytes,
        pages: laid_out.page_count(),
    })
}
