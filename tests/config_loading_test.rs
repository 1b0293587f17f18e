//! Loading field group configs from JSON and registering them end to end.

mod common;

use common::{MapStore, SchemaFixture};
use fieldglass::config::{load_field_groups_from_dir, parse_field_groups};
use fieldglass::resolve::{ParentValue, ResolveContext};
use serde_json::json;
use std::fs;

const ARTICLE_META: &str = r#"{
    "key": "group_article_meta",
    "title": "Article Meta",
    "location": [
        [{"parameter": "entity_kind", "operator": "==", "value": "article"}]
    ],
    "fields": [
        {"key": "field_subtitle", "name": "Subtitle", "kind": "text"},
        {"key": "field_reading_time", "name": "Reading Time", "kind": "number"},
        {
            "key": "field_byline",
            "name": "Byline",
            "kind": "group",
            "sub_fields": [
                {"key": "field_byline_name", "name": "Name", "kind": "text"},
                {"key": "field_byline_hidden", "name": "Internal Note", "kind": "text",
                 "show_in_schema": false}
            ]
        }
    ]
}"#;

#[test]
fn test_parsed_config_registers_and_resolves() {
    let groups = parse_field_groups(ARTICLE_META).expect("valid config");
    let mut fixture = SchemaFixture::new();
    fixture.register(&groups);

    let object = fixture.schema.object("ArticleMeta").expect("ArticleMeta");
    assert!(object.fields.contains_key("subtitle"));
    assert!(object.fields.contains_key("readingTime"));
    assert_eq!(
        fixture.schema.interfaces_for_host("Article"),
        ["WithArticleMeta".to_string()]
    );

    let byline = fixture.schema.object("ArticleMetaByline").expect("byline type");
    assert!(byline.fields.contains_key("name"));
    assert!(!byline.fields.contains_key("internalNote"));

    let mut store = MapStore::new();
    store.insert("10", "field_subtitle", json!("A closer look"));
    let ctx = ResolveContext::new(&store);
    let subtitle = fixture.schema.field("ArticleMeta", "subtitle").unwrap();
    assert_eq!(
        subtitle.resolve(&ParentValue::for_entity("10"), &ctx),
        Some(json!("A closer look"))
    );
}

#[test]
fn test_directory_loading_skips_malformed_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("article.json"), ARTICLE_META).unwrap();
    fs::write(dir.path().join("broken.json"), "{not json").unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let groups = load_field_groups_from_dir(dir.path()).expect("load dir");
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].key, "group_article_meta");
}
