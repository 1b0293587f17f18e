//! Shared fixtures for schema synthesis tests.

#![allow(dead_code)]

use std::collections::HashMap;

use serde_json::Value as JsonValue;

use fieldglass::config::{Field, FieldGroup, FieldKind};
use fieldglass::host::{HostTypeAttributes, HostTypeCatalog};
use fieldglass::kind::FieldKindRegistry;
use fieldglass::location::{LocationCondition, LocationRule};
use fieldglass::registry::Registry;
use fieldglass::resolve::{SingletonLoader, ValueStore};
use fieldglass::schema::InMemorySchema;

/// Registry plus sink, wired with the built-in kinds and the sample host
/// catalog.
pub struct SchemaFixture {
    pub registry: Registry,
    pub schema: InMemorySchema,
}

/// Opt-in log capture; run tests with RUST_LOG=debug to see diagnostics.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

impl SchemaFixture {
    pub fn new() -> Self {
        init_logging();
        Self {
            registry: Registry::new(FieldKindRegistry::with_builtin_kinds(), sample_catalog()),
            schema: InMemorySchema::new(),
        }
    }

    pub fn register(&mut self, groups: &[FieldGroup]) {
        self.registry.register_field_groups(groups, &mut self.schema);
    }
}

/// Three host types keyed by an `entity_kind` attribute.
pub fn sample_catalog() -> HostTypeCatalog {
    let mut catalog = HostTypeCatalog::new();
    catalog.add_host_type(
        "Article",
        HostTypeAttributes::new().accept("entity_kind", "article"),
    );
    catalog.add_host_type(
        "Page",
        HostTypeAttributes::new().accept("entity_kind", "page"),
    );
    catalog.add_host_type(
        "User",
        HostTypeAttributes::new().accept("entity_kind", "user"),
    );
    catalog
}

pub fn rule_equals(parameter: &str, value: &str) -> LocationRule {
    LocationRule::new(vec![LocationCondition::equals(parameter, value)])
}

/// A simple two-field group attached to articles.
pub fn hero_group() -> FieldGroup {
    let mut group = FieldGroup::new("group_hero", "Hero");
    group.fields = vec![
        Field::new("field_hero_title", "Title", FieldKind::Text),
        Field::new("field_hero_count", "Count", FieldKind::Number),
    ];
    group.location = vec![rule_equals("entity_kind", "article")];
    group
}

/// In-memory value store keyed by (entity id, storage key).
#[derive(Default)]
pub struct MapStore {
    values: HashMap<(String, String), JsonValue>,
}

impl MapStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        entity_id: &str,
        storage_key: &str,
        value: JsonValue,
    ) -> &mut Self {
        self.values
            .insert((entity_id.to_string(), storage_key.to_string()), value);
        self
    }
}

impl ValueStore for MapStore {
    fn get(&self, storage_key: &str, entity_id: &str, _format: bool) -> Option<JsonValue> {
        self.values
            .get(&(entity_id.to_string(), storage_key.to_string()))
            .cloned()
    }
}

/// In-memory options loader keyed by (slug, storage key).
#[derive(Default)]
pub struct MapSingletons {
    values: HashMap<(String, String), JsonValue>,
}

impl MapSingletons {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, slug: &str, storage_key: &str, value: JsonValue) -> &mut Self {
        self.values
            .insert((slug.to_string(), storage_key.to_string()), value);
        self
    }
}

impl SingletonLoader for MapSingletons {
    fn load(&self, slug: &str, storage_key: &str, _format: bool) -> Option<JsonValue> {
        self.values
            .get(&(slug.to_string(), storage_key.to_string()))
            .cloned()
    }
}
