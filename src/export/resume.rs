use crate::content::model::{ContentDocument, Locale};
use crate::export::layout::{Composer, Cursor, LaidOutDocument, PageGeometry, TextStyle};
use crate::export::metrics::{FontFace, TextMeasure};
use crate::foundation::error::FolioError;
use std::str::FromStr;

/// Resume verbosity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// One page: three timeline entries, three publications, closing note.
    Short,
    /// Everything, with descriptions and projects.
    Long,
}

impl Variant {
    pub fn file_name(self) -> &'static str {
        match self {
            Variant::Short => "resume_short.pdf",
            Variant::Long => "resume_extended.pdf",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Short => "short",
            Variant::Long => "long",
        }
    }
}

impl FromStr for Variant {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short" => Ok(Variant::Short),
            "long" => Ok(Variant::Long),
            other => Err(FolioError::validation(format!(
                "unknown resume variant '{other}' (expected short or long)"
            ))),
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const SHORT_ENTRY_LIMIT: usize = 3;

const NAME: TextStyle = TextStyle::new(20.0, FontFace::Bold);
const ROLE: TextStyle = TextStyle::new(12.0, FontFace::Italic);
const CONTACT: TextStyle = TextStyle::new(9.0, FontFace::Italic);
const HEADING: TextStyle = TextStyle::new(12.0, FontFace::Bold);
const BODY: TextStyle = TextStyle::new(10.0, FontFace::Regular);
const ENTRY_HEAD: TextStyle = TextStyle::new(10.0, FontFace::Bold);
const ENTRY_TITLE: TextStyle = TextStyle::new(10.0, FontFace::Italic);
const DESCRIPTION: TextStyle = TextStyle::new(9.0, FontFace::Regular).with_gray(100);
const SMALL: TextStyle = TextStyle::new(9.0, FontFace::Regular);
const CLOSING: TextStyle = TextStyle::new(8.0, FontFace::Regular).with_gray(150);

/// Section headings, overridable through `cv*` UI keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Headings {
    pub profile: String,
    pub history: String,
    pub education_experience: String,
    pub projects: String,
    pub publications: String,
    pub closing_note: String,
}

impl Headings {
    pub fn resolve(doc: &ContentDocument, locale: Locale) -> Self {
        let pick = |key: &str, default: &str| {
            doc.ui_text(key, locale)
                .filter(|s| !s.is_empty())
                .unwrap_or(default)
                .to_string()
        };
        Self {
            profile: pick("cvProfile", "PROFILE"),
            history: pick("cvHistory", "HISTORY"),
            education_experience: pick("cvEducationExperience", "EDUCATION & EXPERIENCE"),
            projects: pick("cvProjects", "SELECTED PROJECTS"),
            publications: pick("cvPublications", "PUBLICATIONS"),
            closing_note: pick(
                "cvClosingNote",
                "Full CV and project portfolio available at website.",
            ),
        }
    }
}

/// Lay out the resume for `locale` and `variant`.
pub fn layout_resume(
    doc: &ContentDocument,
    locale: Locale,
    variant: Variant,
    geometry: &PageGeometry,
    measure: &dyn TextMeasure,
) -> LaidOutDocument {
    let headings = Headings::resolve(doc, locale);
    let (mut c, cursor) = Composer::new(geometry.clone(), measure);
    let left = geometry.left_x;
    let long = variant == Variant::Long;

    let mut y = header(&mut c, cursor, doc, locale);

    if long {
        y = c.emit_text(y, &headings.profile, left, HEADING);
        y = c.emit_text(y, doc.profile.about.get(locale), left, BODY);
        y = y.down(5.0);
    }

    let timeline_heading = if long {
        &headings.history
    } else {
        &headings.education_experience
    };
    y = c.emit_text(y, timeline_heading, left, HEADING);
    let entries = match variant {
        Variant::Short => &doc.history[..doc.history.len().min(SHORT_ENTRY_LIMIT)],
        Variant::Long => &doc.history[..],
    };
    for entry in entries {
        y = c.ensure_block(y);
        c.text_at(y, &entry.year, left, ENTRY_HEAD);
        c.text_at(y, &entry.institution, geometry.inner_x, ENTRY_HEAD);
        y = y.down(5.0);
        c.text_at(y, entry.title.get(locale), geometry.inner_x, ENTRY_TITLE);
        y = y.down(5.0);
        if long {
            let lines = c.place_wrapped(
                y,
                entry.description.get(locale),
                geometry.inner_x,
                geometry.description_width,
                DESCRIPTION,
            );
            y = y.down(lines as f64 * geometry.description_line_height + 4.0);
        } else {
            y = y.down(2.0);
        }
    }
    y = y.down(5.0);
    y = c.ensure_block(y);

    if long {
        y = c.emit_text(y, &headings.projects, left, HEADING);
        for project in &doc.projects {
            y = c.ensure_block(y);
            c.text_at(y, project.title.get(locale), left, ENTRY_HEAD);
            y = y.down(5.0);
            let line = format!(
                "{} [{}]",
                project.description.get(locale),
                project.technologies.join(", ")
            );
            y = c.emit_text(y, &line, left, SMALL);
            y = y.down(2.0);
        }
        y = y.down(5.0);
    }

    y = c.ensure_room(y, geometry.publications_break_threshold);
    y = c.emit_text(y, &headings.publications, left, HEADING);
    let publications = match variant {
        Variant::Short => &doc.publications[..doc.publications.len().min(SHORT_ENTRY_LIMIT)],
        Variant::Long => &doc.publications[..],
    };
    for publication in publications {
        y = c.ensure_block(y);
        let line = format!(
            "[{}] {}. {}. {}.",
            publication.year,
            publication.title,
            publication.authors.join(", "),
            publication.venue
        );
        y = c.emit_text(y, &line, left, SMALL);
    }

    if !long {
        c.centered_at(
            geometry.footer_y,
            &headings.closing_note,
            geometry.page_width / 2.0,
            CLOSING,
        );
    }

    let laid_out = c.finish();
    tracing::debug!(
        variant = variant.as_str(),
        locale = locale.code(),
        pages = laid_out.page_count(),
        "resume laid out"
    );
    laid_out
}

fn header(c: &mut Composer<'_>, cursor: Cursor, doc: &ContentDocument, locale: Locale) -> Cursor {
    let left = c.geometry().left_x;
    let y = c.ensure_block(cursor);
    let y = c.emit_text(y, &doc.profile.name.to_uppercase(), left, NAME);
    let y = c.emit_text(y.down(-2.0), doc.profile.role.get(locale), left, ROLE);
    let contact = format!("{} | {}", doc.profile.email, doc.profile.location);
    c.text_at(y, &contact, left, CONTACT);
    c.rule(y.down(10.0))
}

#[cfg(test)]
#[path = "../../tests/unit/export/resume.rs"]
mod tests;
