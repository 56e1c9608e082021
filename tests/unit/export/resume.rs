use super::*;
use crate::content::model::Localized;
use crate::export::metrics::HelveticaMetrics;

fn fixture() -> ContentDocument {
    ContentDocument::from_json_str(include_str!("../../data/content.json")).unwrap()
}

fn lay(doc: &ContentDocument, locale: Locale, variant: Variant) -> LaidOutDocument {
    layout_resume(doc, locale, variant, &PageGeometry::default(), &HelveticaMetrics)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn variant_names() {
    assert_eq!(Variant::Short.file_name(), "resume_short.pdf");
    assert_eq!(Variant::Long.file_name(), "resume_extended.pdf");
    assert_eq!("long".parse::<Variant>().unwrap(), Variant::Long);
    assert!("medium".parse::<Variant>().is_err());
}

#[test]
fn header_geometry() {
    let out = lay(&fixture(), Locale::En, Variant::Short);
    let page = &out.pages[0];
    assert_eq!(page.runs[0].text, "ADA FERRARIS");
    assert!(close(page.runs[0].y, 20.0));
    assert_eq!(page.runs[0].style.face, FontFace::Bold);
    assert_eq!(page.runs[1].text, "Computer Vision Engineer");
    assert!(close(page.runs[1].y, 28.0));
    assert_eq!(page.runs[2].text, "ada@example.org | Torino, IT");
    assert!(close(page.runs[2].y, 35.2));
    assert!(close(page.rules[0].y, 45.2));
    assert_eq!(page.rules[0].gray, 200);
}

#[test]
fn short_variant_scenario() {
    let out = lay(&fixture(), Locale::En, Variant::Short);
    assert_eq!(out.page_count(), 1);
    let text = out.text();

    let (_, heading) = out.find("EDUCATION & EXPERIENCE").unwrap();
    assert!(close(heading.y, 53.2));
    assert!(!text.contains("HISTORY"));
    assert!(!text.contains("PROFILE"));
    assert!(!text.contains("SELECTED PROJECTS"));
    assert!(!text.contains("ENGLISH-PROJECT"));
    assert!(!text.contains("ENGLISH-DESC"));

    for n in 1..=3 {
        assert!(text.contains(&format!("ENGLISH-TITLE-{n}")));
        assert!(text.contains(&format!("PUB-{n}")));
    }
    assert!(!text.contains("ENGLISH-TITLE-4"));
    assert!(!text.contains("PUB-4"));

    let (_, first_year) = out.find("2023 - Present").unwrap();
    assert!(close(first_year.y, 60.4));
    let (_, second_year) = out.find("2021 - 2023").unwrap();
    assert!(close(second_year.y, 72.4));

    let (_, pub1) = out.find("PUB-1").unwrap();
    assert_eq!(
        pub1.text,
        "[2024] PUB-1 Markerless Gait Analysis in the Wild. A. Ferraris, B. Rossi. Journal of Biomechanics."
    );

    let (page, note) = out.find("Full CV and project portfolio").unwrap();
    assert_eq!(page, out.page_count() - 1);
    assert!(close(note.y, 285.0));
    assert_eq!(note.style.gray, 150);
    let w = HelveticaMetrics.width_mm(&note.text, FontFace::Regular, 8.0);
    assert!(close(note.x + w / 2.0, 105.0));
}

#[test]
fn long_variant_scenario() {
    let out = lay(&fixture(), Locale::En, Variant::Long);
    let text = out.text();
    for n in 1..=5 {
        assert!(text.contains(&format!("ENGLISH-TITLE-{n}")));
        assert!(text.contains(&format!("ENGLISH-DESC-{n}")));
        assert!(text.contains(&format!("PUB-{n}")));
    }
    assert!(text.contains("ENGLISH-PDESC-1 Gait metrics from phone video. [Python, PyTorch]"));
    assert!(text.contains("ENGLISH-PROJECT-4"));
    assert!(!text.contains("Full CV and project portfolio"));
    assert!(!text.contains("EDUCATION & EXPERIENCE"));

    let order: Vec<usize> = ["PROFILE", "HISTORY", "SELECTED PROJECTS", "PUBLICATIONS"]
        .iter()
        .map(|h| out.runs().position(|(_, r)| r.text == *h).unwrap())
        .collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]));

    let (_, desc) = out.find("ENGLISH-DESC-1").unwrap();
    assert_eq!(desc.x, 50.0);
    assert_eq!(desc.style.gray, 100);
    assert_eq!(desc.style.size_pt, 9.0);
}

#[test]
fn each_locale_is_pure() {
    let doc = fixture();
    for variant in [Variant::Short, Variant::Long] {
        let en = lay(&doc, Locale::En, variant).text();
        let it = lay(&doc, Locale::It, variant).text();
        assert!(en.contains("ENGLISH-"));
        assert!(!en.contains("ITALIANO-"));
        assert!(it.contains("ITALIANO-"));
        assert!(!it.contains("ENGLISH-"));
    }
    let it = lay(&doc, Locale::It, Variant::Long).text();
    assert!(it.contains("Ingegnera di Visione Artificiale"));
    assert!(it.contains("ITALIANO-ABOUT"));
}

#[test]
fn headings_follow_ui_overrides() {
    let mut doc = fixture();
    doc.ui.insert(
        "cvPublications".to_string(),
        Localized::new("PAPERS", "PUBBLICAZIONI"),
    );
    let it = lay(&doc, Locale::It, Variant::Short).text();
    assert!(it.contains("PUBBLICAZIONI"));
    assert!(!it.contains("PUBLICATIONS"));
    // Keys that are absent fall back to the English defaults in every locale.
    assert!(it.contains("EDUCATION & EXPERIENCE"));
}

#[test]
fn long_history_paginates_without_blank_pages() {
    let mut doc = fixture();
    let base = doc.history.clone();
    for i in 0..12 {
        doc.history.extend(base.iter().cloned().map(|mut e| {
            e.id = format!("{}-{i}", e.id);
            e
        }));
    }
    let out = lay(&doc, Locale::En, Variant::Long);
    assert!(out.page_count() > 2);
    for page in &out.pages {
        assert!(!page.runs.is_empty());
    }
    for page in &out.pages[1..] {
        assert!(close(page.runs[0].y, 20.0));
    }
    let geometry = PageGeometry::default();
    for (_, run) in out.runs() {
        if run.style == ENTRY_HEAD && run.x == geometry.left_x {
            assert!(run.y <= geometry.break_threshold, "block starts at {}", run.y);
        }
    }
}

#[test]
fn layout_is_deterministic() {
    let doc = fixture();
    assert_eq!(
        lay(&doc, Locale::It, Variant::Long),
        lay(&doc, Locale::It, Variant::Long)
    );
}

#[test]
fn accepted_geometries_never_leave_blank_pages() {
    let doc = fixture();
    for top_margin in [0.0, 20.0, 120.0, 200.0, 255.0, 259.0, 265.0, 269.0] {
        let geometry = PageGeometry {
            top_margin,
            ..PageGeometry::default()
        };
        if geometry.validate().is_err() {
            assert!(top_margin >= geometry.publications_break_threshold);
            continue;
        }
        for variant in [Variant::Short, Variant::Long] {
            let out = layout_resume(&doc, Locale::En, variant, &geometry, &HelveticaMetrics);
            for (i, page) in out.pages.iter().enumerate() {
                assert!(
                    !page.runs.is_empty() || !page.rules.is_empty(),
                    "top_margin {top_margin}: page {i} is blank"
                );
            }
        }
    }
}
