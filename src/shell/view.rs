use serde::{Deserialize, Serialize};

use crate::content::model::{
    ContentDocument, Locale, ProjectCategory, ProjectEntry, PublicationEntry,
};
use crate::foundation::error::FolioError;

/// Authors shown before the list is cut short.
pub const AUTHORS_SHOWN: usize = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark { Theme::Dark } else { Theme::Light }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Project gallery filter: everything, or one category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ProjectFilter {
    #[default]
    All,
    Category(ProjectCategory),
}

impl ProjectFilter {
    pub fn matches(self, project: &ProjectEntry) -> bool {
        match self {
            ProjectFilter::All => true,
            ProjectFilter::Category(c) => project.category == c,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectFilter::All => "all",
            ProjectFilter::Category(c) => c.as_str(),
        }
    }
}

impl std::str::FromStr for ProjectFilter {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(ProjectFilter::All);
        }
        s.parse().map(ProjectFilter::Category)
    }
}

impl std::fmt::Display for ProjectFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the visitor has toggled. Nothing here is persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    pub locale: Locale,
    pub theme: Theme,
    pub filter: ProjectFilter,
}

impl ViewState {
    /// English, unfiltered, themed after the platform hint.
    pub fn new(prefers_dark: bool) -> Self {
        Self {
            locale: Locale::En,
            theme: Theme::from_prefers_dark(prefers_dark),
            filter: ProjectFilter::All,
        }
    }

    pub fn toggle_locale(&mut self) -> Locale {
        self.locale = self.locale.toggled();
        self.locale
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    pub fn set_filter(&mut self, filter: ProjectFilter) {
        self.filter = filter;
    }
}

/// `All` followed by each project category in order of first appearance.
pub fn categories(doc: &ContentDocument) -> Vec<ProjectFilter> {
    let mut out = vec![ProjectFilter::All];
    for p in &doc.projects {
        let f = ProjectFilter::Category(p.category);
        if !out.contains(&f) {
            out.push(f);
        }
    }
    out
}

pub fn filtered_projects(doc: &ContentDocument, filter: ProjectFilter) -> Vec<&ProjectEntry> {
    doc.projects.iter().filter(|p| filter.matches(p)).collect()
}

/// First [`AUTHORS_SHOWN`] authors, then `, et al.` if any were left out.
pub fn author_line(publication: &PublicationEntry) -> String {
    let shown = publication
        .authors
        .iter()
        .take(AUTHORS_SHOWN)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if publication.authors.len() > AUTHORS_SHOWN {
        format!("{shown}, et al.")
    } else {
        shown
    }
}

pub fn doi_url(publication: &PublicationEntry) -> Option<String> {
    publication
        .doi
        .as_deref()
        .map(|doi| format!("https://doi.org/{doi}"))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SocialIcon {
    Github,
    Linkedin,
    Scholar,
    Instagram,
    ExternalLink,
}

impl SocialIcon {
    pub fn as_str(self) -> &'static str {
        match self {
            SocialIcon::Github => "github",
            SocialIcon::Linkedin => "linkedin",
            SocialIcon::Scholar => "scholar",
            SocialIcon::Instagram => "instagram",
            SocialIcon::ExternalLink => "external-link",
        }
    }
}

pub fn social_icon(icon_name: &str) -> SocialIcon {
    match icon_name {
        "Github" => SocialIcon::Github,
        "Linkedin" => SocialIcon::Linkedin,
        "GraduationCap" => SocialIcon::Scholar,
        "Instagram" => SocialIcon::Instagram,
        _ => SocialIcon::ExternalLink,
    }
}

pub fn ui<'d>(doc: &'d ContentDocument, key: &str, locale: Locale) -> Option<&'d str> {
    doc.ui_text(key, locale)
}

#[cfg(test)]
#[path = "../../tests/unit/shell/view.rs"]
mod tests;
