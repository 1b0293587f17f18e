//! Host-type mapping: explicit host lists, rule evaluation against the
//! catalog, and the interplay between the two.

mod common;

use common::{hero_group, rule_equals, SchemaFixture};
use fieldglass::location::{LocationCondition, LocationRule};

#[test]
fn test_explicit_host_types_override_rules() {
    let mut fixture = SchemaFixture::new();
    let mut group = hero_group();
    group.host_types = Some(vec!["Page".to_string(), "User".to_string()]);
    // The article rule is ignored while an explicit list is present.
    fixture.register(&[group]);

    assert!(fixture.schema.interfaces_for_host("Article").is_empty());
    assert_eq!(
        fixture.schema.interfaces_for_host("Page"),
        ["WithHero".to_string()]
    );
    assert_eq!(
        fixture.schema.interfaces_for_host("User"),
        ["WithHero".to_string()]
    );
}

#[test]
fn test_empty_explicit_list_is_a_deliberate_detach() {
    let mut fixture = SchemaFixture::new();
    let mut group = hero_group();
    group.host_types = Some(Vec::new());
    fixture.register(&[group]);

    // The type still registers, but no attachment interface exists.
    assert!(fixture.schema.object("Hero").is_some());
    assert!(fixture.schema.interface("WithHero").is_none());
    assert!(fixture.schema.interfaces_for_host("Article").is_empty());
}

#[test]
fn test_map_from_rules_reevaluates_despite_explicit_list() {
    let mut fixture = SchemaFixture::new();
    let mut group = hero_group();
    group.host_types = Some(vec!["Page".to_string()]);
    group.map_from_rules = true;
    fixture.register(&[group]);

    assert_eq!(
        fixture.schema.interfaces_for_host("Article"),
        ["WithHero".to_string()]
    );
    assert!(fixture.schema.interfaces_for_host("Page").is_empty());
}

#[test]
fn test_not_equals_branch_matches_other_hosts_with_parameter() {
    let mut fixture = SchemaFixture::new();
    let mut group = hero_group();
    group.location = vec![LocationRule::new(vec![LocationCondition::not_equals(
        "entity_kind",
        "article",
    )])];
    fixture.register(&[group]);

    assert!(fixture.schema.interfaces_for_host("Article").is_empty());
    assert_eq!(
        fixture.schema.interfaces_for_host("Page"),
        ["WithHero".to_string()]
    );
    assert_eq!(
        fixture.schema.interfaces_for_host("User"),
        ["WithHero".to_string()]
    );
}

#[test]
fn test_and_branch_requires_all_conditions() {
    let mut fixture = SchemaFixture::new();
    let mut group = hero_group();
    group.location = vec![LocationRule::new(vec![
        LocationCondition::equals("entity_kind", "article"),
        LocationCondition::equals("entity_kind", "page"),
    ])];
    fixture.register(&[group]);

    // No single host satisfies both conditions of the AND branch.
    assert!(fixture.schema.object("Hero").is_some());
    assert!(fixture.schema.interface("WithHero").is_none());
}

#[test]
fn test_or_branches_union_hosts() {
    let mut fixture = SchemaFixture::new();
    let mut group = hero_group();
    group.location = vec![
        rule_equals("entity_kind", "article"),
        rule_equals("entity_kind", "page"),
    ];
    fixture.register(&[group]);

    assert_eq!(
        fixture.schema.interfaces_for_host("Article"),
        ["WithHero".to_string()]
    );
    assert_eq!(
        fixture.schema.interfaces_for_host("Page"),
        ["WithHero".to_string()]
    );
    assert!(fixture.schema.interfaces_for_host("User").is_empty());
}

#[test]
fn test_unknown_parameter_matches_no_host() {
    let mut fixture = SchemaFixture::new();
    let mut group = hero_group();
    group.location = vec![rule_equals("template", "landing-page")];
    fixture.register(&[group]);

    assert!(fixture.schema.interface("WithHero").is_none());
}
