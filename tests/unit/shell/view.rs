use super::*;
use crate::content::model::ContentDocument;

const FIXTURE: &str = include_str!("../../data/content.json");

fn doc() -> ContentDocument {
    ContentDocument::from_json_str(FIXTURE).unwrap()
}

#[test]
fn initial_view_follows_dark_hint() {
    assert_eq!(ViewState::new(true).theme, Theme::Dark);
    let light = ViewState::new(false);
    assert_eq!(light.theme, Theme::Light);
    assert_eq!(light.locale, Locale::En);
    assert_eq!(light.filter, ProjectFilter::All);
}

#[test]
fn toggles_flip_back_and_forth() {
    let mut v = ViewState::new(false);
    assert_eq!(v.toggle_locale(), Locale::It);
    assert_eq!(v.toggle_locale(), Locale::En);
    assert_eq!(v.toggle_theme(), Theme::Dark);
    assert_eq!(v.toggle_theme(), Theme::Light);
}

#[test]
fn categories_in_first_appearance_order() {
    let cats = categories(&doc());
    assert_eq!(
        cats,
        [
            ProjectFilter::All,
            ProjectFilter::Category(ProjectCategory::Biomechanics),
            ProjectFilter::Category(ProjectCategory::Mobile),
            ProjectFilter::Category(ProjectCategory::Vision),
        ]
    );
}

#[test]
fn filter_keeps_source_order() {
    let d = doc();
    let all: Vec<_> = filtered_projects(&d, ProjectFilter::All)
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(all, ["p1", "p2", "p3", "p4"]);
    let bio: Vec<_> = filtered_projects(&d, "biomechanics".parse().unwrap())
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(bio, ["p1", "p4"]);
    assert!(filtered_projects(&d, ProjectFilter::Category(ProjectCategory::Web)).is_empty());
}

#[test]
fn filter_parses_all_and_categories() {
    assert_eq!("ALL".parse::<ProjectFilter>().unwrap(), ProjectFilter::All);
    assert_eq!(
        "vision".parse::<ProjectFilter>().unwrap().to_string(),
        "vision"
    );
    assert!("robots".parse::<ProjectFilter>().is_err());
}

#[test]
fn author_line_truncates_after_three() {
    let d = doc();
    assert_eq!(author_line(&d.publications[0]), "A. Ferraris, B. Rossi");
    assert_eq!(
        author_line(&d.publications[1]),
        "A. Ferraris, C. Bianchi, D. Verdi, et al."
    );
}

#[test]
fn doi_links_only_when_present() {
    let d = doc();
    assert_eq!(
        doi_url(&d.publications[0]).as_deref(),
        Some("https://doi.org/10.1000/jb.2024.1")
    );
    assert_eq!(doi_url(&d.publications[1]), None);
}

#[test]
fn social_icons_fall_back_to_external_link() {
    let d = doc();
    let icons: Vec<_> = d
        .profile
        .socials
        .iter()
        .map(|s| social_icon(&s.icon_name))
        .collect();
    assert_eq!(
        icons,
        [
            SocialIcon::Github,
            SocialIcon::Linkedin,
            SocialIcon::Scholar,
            SocialIcon::ExternalLink,
        ]
    );
    assert_eq!(social_icon("Instagram"), SocialIcon::Instagram);
    assert_eq!(social_icon("github"), SocialIcon::ExternalLink);
}

#[test]
fn ui_lookup_by_locale() {
    let d = doc();
    assert_eq!(ui(&d, "papers", Locale::En), Some("Publications"));
    assert_eq!(ui(&d, "papers", Locale::It), Some("Pubblicazioni"));
    assert_eq!(ui(&d, "nope", Locale::En), None);
}
