use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::foundation::error::{FolioError, FolioResult};

/// The two supported locales.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    It,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::It];

    /// Lowercase ISO 639-1 code.
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::It => "it",
        }
    }

    /// The other locale.
    pub fn toggled(self) -> Self {
        match self {
            Locale::En => Locale::It,
            Locale::It => Locale::En,
        }
    }
}

impl std::str::FromStr for Locale {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "it" => Ok(Locale::It),
            other => Err(FolioError::validation(format!("unsupported locale '{other}'"))),
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A value carrying both locale variants.
///
/// Both fields are required when deserializing; a document missing either fails to load.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized {
    pub en: String,
    pub it: String,
}

impl Localized {
    pub fn new(en: impl Into<String>, it: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            it: it.into(),
        }
    }

    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::It => &self.it,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialProfile {
    pub network: String,
    pub username: String,
    pub url: String,
    /// Icon reference resolved by the presentation shell.
    pub icon_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub role: Localized,
    pub tagline: Localized,
    pub email: String,
    pub location: String,
    pub socials: Vec<SocialProfile>,
    pub about: Localized,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Education,
    Work,
    Award,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub id: String,
    /// Free-form label such as `2019 - 2021`.
    pub year: String,
    pub title: Localized,
    pub institution: String,
    pub description: Localized,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logos: Option<Vec<String>>,
}

impl TimelineEntry {
    /// Logo references in display order. `logos` wins over the single `logo` field.
    pub fn logo_refs(&self) -> Vec<&str> {
        match (&self.logos, &self.logo) {
            (Some(many), _) => many.iter().map(String::as_str).collect(),
            (None, Some(one)) => vec![one.as_str()],
            (None, None) => Vec::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectCategory {
    Vision,
    Biomechanics,
    System,
    Web,
    Mobile,
}

impl ProjectCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectCategory::Vision => "vision",
            ProjectCategory::Biomechanics => "biomechanics",
            ProjectCategory::System => "system",
            ProjectCategory::Web => "web",
            ProjectCategory::Mobile => "mobile",
        }
    }
}

impl std::str::FromStr for ProjectCategory {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vision" => Ok(Self::Vision),
            "biomechanics" => Ok(Self::Biomechanics),
            "system" => Ok(Self::System),
            "web" => Ok(Self::Web),
            "mobile" => Ok(Self::Mobile),
            other => Err(FolioError::validation(format!(
                "unknown project category '{other}'"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    pub id: String,
    pub title: Localized,
    pub description: Localized,
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_store_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_store_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    pub category: ProjectCategory,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationEntry {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub venue: String,
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// UI string table keyed by string id.
pub type UiStrings = BTreeMap<String, Localized>;

/// The whole content document. Immutable once loaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDocument {
    pub profile: Profile,
    pub history: Vec<TimelineEntry>,
    pub projects: Vec<ProjectEntry>,
    pub publications: Vec<PublicationEntry>,
    pub ui: UiStrings,
}

impl ContentDocument {
    /// Parse a content document from any JSON reader. Does not validate.
    pub fn from_reader<R: std::io::Read>(r: R) -> FolioResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| FolioError::content(format!("parse content JSON: {e}")))
    }

    /// Parse a content document from a JSON string. Does not validate.
    pub fn from_json_str(s: &str) -> FolioResult<Self> {
        serde_json::from_str(s).map_err(|e| FolioError::content(format!("parse content JSON: {e}")))
    }

    /// Parse and validate a content document from a JSON file on disk.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> FolioResult<Self> {
        let path = path.as_ref();
        let f = std::fs::File::open(path).map_err(|e| {
            FolioError::content(format!("open content JSON '{}': {e}", path.display()))
        })?;
        let doc = Self::from_reader(std::io::BufReader::new(f))?;
        doc.validate()?;
        Ok(doc)
    }

    /// Check invariants that the JSON shape alone cannot express.
    pub fn validate(&self) -> FolioResult<()> {
        if self.profile.name.trim().is_empty() {
            return Err(FolioError::validation("profile.name must be non-empty"));
        }
        unique_ids("history", self.history.iter().map(|e| e.id.as_str()))?;
        unique_ids("projects", self.projects.iter().map(|e| e.id.as_str()))?;
        unique_ids(
            "publications",
            self.publications.iter().map(|e| e.id.as_str()),
        )?;
        for p in &self.publications {
            if p.year <= 0 {
                return Err(FolioError::validation(format!(
                    "publication '{}' has non-positive year {}",
                    p.id, p.year
                )));
            }
        }
        Ok(())
    }

    /// Look up a UI string for `locale`.
    pub fn ui_text(&self, key: &str, locale: Locale) -> Option<&str> {
        self.ui.get(key).map(|l| l.get(locale))
    }
}

fn unique_ids<'a>(list: &str, ids: impl Iterator<Item = &'a str>) -> FolioResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err(FolioError::validation(format!("{list}: entry id must be non-empty")));
        }
        if !seen.insert(id) {
            return Err(FolioError::validation(format!("{list}: duplicate id '{id}'")));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/content/model.rs"]
mod tests;
