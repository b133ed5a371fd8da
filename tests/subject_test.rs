//! Integration tests for subject inference.

use remarks::{
    first_child_path, subject_parent_type, subject_substitute, subject_type, IndexPhrasing, Path,
    Rules, Store, SubjectType, ROOT_PATH,
};
use serde_json::json;

fn path(value: &str) -> Path {
    Path::ensure(value).unwrap()
}

fn canonical_store(rules: Rules) -> Store {
    Store::ensure_with(
        &json!({
            ROOT_PATH: ["{subject} is incomplete"],
            "data": ["{subject} is invalid"],
            "data.{user}": ["{subject} is invalid"],
            "data.{user}.{emails}": ["{subject} is invalid"],
            "data.{user}.{emails}.[0]": ["{subject} is invalid"],
        }),
        rules,
    )
    .unwrap()
}

#[test]
fn test_record_field_subject() {
    let store = canonical_store(Rules::default());
    assert_eq!(
        store.subject_substitute(&path("data.{user}")).as_deref(),
        Some("user in data")
    );
    assert_eq!(
        store.subject_substitute(&path("data.{user}.{emails}")).as_deref(),
        Some("emails in data.{user}")
    );
}

#[test]
fn test_root_has_no_subject() {
    let store = canonical_store(Rules::default());
    assert_eq!(store.subject_substitute(&Path::root()), None);
}

#[test]
fn test_array_element_falls_back_to_raw_path() {
    let store = canonical_store(Rules::default());

    assert_eq!(
        store.subject_substitute(&path("data.{user}.{emails}.[0]")).as_deref(),
        Some("data.{user}.{emails}.[0]")
    );
}

#[test]
fn test_array_element_positional_phrase() {
    let rules = Rules::new().with_index_phrasing(IndexPhrasing::Positional);
    let store = canonical_store(rules);

    assert_eq!(
        store.subject_substitute(&path("data.{user}.{emails}.[0]")).as_deref(),
        Some("Item at index 0 in data.{user}.{emails}")
    );
}

#[test]
fn test_types_follow_the_current_store() {
    let mut store = Store::from_entries([("tags", vec!["{subject} is invalid"])]).unwrap();
    let tags = path("tags");
    assert_eq!(subject_type(&tags, &store, None), None);
    assert_eq!(store.subject_substitute(&tags), None);

    store = Store::from_entries([
        ("tags", vec!["{subject} is invalid"]),
        ("tags.[1]", vec!["{subject} is too long"]),
    ])
    .unwrap();
    assert_eq!(subject_type(&tags, &store, None), Some(SubjectType::Array));
    assert_eq!(store.subject_substitute(&tags).as_deref(), Some("tags"));
}

#[test]
fn test_first_child_is_smallest_sibling() {
    let store = Store::from_entries([
        ("user.{roles}", vec!["x"]),
        ("user.{name}", vec!["x"]),
        ("user", vec!["x"]),
    ])
    .unwrap();

    assert_eq!(
        first_child_path(&path("user"), &store),
        Some(&path("user.{name}"))
    );
}

#[test]
fn test_parent_type_uses_path_as_hint() {
    let store = Store::from_entries([
        ("mixed.[0]", vec!["x"]),
        ("mixed.{key}", vec!["x"]),
    ])
    .unwrap();

    assert_eq!(
        subject_parent_type(&path("mixed.{key}"), &store),
        Some(SubjectType::Record)
    );
    assert_eq!(
        subject_parent_type(&path("mixed.[0]"), &store),
        Some(SubjectType::Array)
    );
}

#[test]
fn test_distant_descendants_do_not_type_a_path() {
    let store = Store::from_entries([
        ("report", vec!["x"]),
        ("report.section.{title}", vec!["x"]),
    ])
    .unwrap();

    assert_eq!(subject_type(&path("report"), &store, None), None);
    assert_eq!(
        subject_substitute(&path("report"), &store, IndexPhrasing::Positional),
        None
    );
}
