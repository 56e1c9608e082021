use super::*;

const FIXTURE: &str = include_str!("../../data/content.json");

#[test]
fn loads_fixture_from_disk() {
    let mut store = ContentStore::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/content.json"));
    assert!(!store.state().is_ready());
    assert!(store.load().is_ready());
    let doc = store.document().unwrap();
    assert_eq!(doc.profile.name, "Ada Ferraris");
}

#[test]
fn missing_file_stays_loading() {
    let mut store = ContentStore::at_root("definitely/not/here");
    assert!(store.source().ends_with(DEFAULT_CONTENT_PATH));
    assert!(matches!(store.load(), LoadState::Loading));
    assert!(store.document().is_none());
}

#[test]
fn malformed_json_stays_loading_and_is_not_retried() {
    let mut store = ContentStore::new("inline");
    assert!(matches!(store.load_from_str("{ not json"), LoadState::Loading));
    // A later valid payload is ignored: the load happens once.
    assert!(matches!(store.load_from_str(FIXTURE), LoadState::Loading));
}

#[test]
fn invalid_document_stays_loading() {
    let mut store = ContentStore::new("inline");
    let dup = FIXTURE.replace(r#""id": "h2""#, r#""id": "h1""#);
    assert!(matches!(store.load_from_str(&dup), LoadState::Loading));
}

#[test]
fn snapshots_share_one_document() {
    let mut store = ContentStore::new("inline");
    store.load_from_str(FIXTURE);
    let a = store.document().unwrap();
    let b = store.document().unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}
