//! Fieldglass synthesizes a typed schema from field group configs.
//!
//! A field group is a named, ordered collection of field configs attached
//! to host types by location rules. Fieldglass walks a set of groups and
//! registers, into a [`schema::SchemaSink`], one object type per group, a
//! `{Type}_Fields` interface carrying its fields, and a `With{Type}`
//! interface that exposes the group on its host types. Every synthesized
//! field carries a resolver that fetches, coerces, and shapes the stored
//! value at query time.
//!
//! The crate is schema-library agnostic: [`schema::InMemorySchema`] is the
//! reference sink, and any schema builder can implement
//! [`schema::SchemaSink`] instead.
//!
//! # Example
//!
//! ```
//! use fieldglass::config::{Field, FieldGroup, FieldKind};
//! use fieldglass::host::{HostTypeAttributes, HostTypeCatalog};
//! use fieldglass::kind::FieldKindRegistry;
//! use fieldglass::location::{LocationCondition, LocationRule};
//! use fieldglass::registry::Registry;
//! use fieldglass::schema::InMemorySchema;
//!
//! let mut catalog = HostTypeCatalog::new();
//! catalog.add_host_type(
//!     "Article",
//!     HostTypeAttributes::new().accept("entity_kind", "article"),
//! );
//!
//! let mut group = FieldGroup::new("group_hero", "Hero");
//! group.fields = vec![Field::new("field_title", "Title", FieldKind::Text)];
//! group.location = vec![LocationRule::new(vec![LocationCondition::equals(
//!     "entity_kind",
//!     "article",
//! )])];
//!
//! let mut registry = Registry::new(FieldKindRegistry::with_builtin_kinds(), catalog);
//! let mut schema = InMemorySchema::new();
//! registry.register_field_groups(&[group], &mut schema);
//!
//! assert!(schema.object("Hero").is_some());
//! assert_eq!(schema.interfaces_for_host("Article"), ["WithHero".to_string()]);
//! ```

pub mod config;
pub mod error;
pub mod field_config;
pub mod host;
pub mod kind;
pub mod location;
pub mod names;
pub mod registry;
pub mod resolve;
pub mod schema;

pub use error::{SchemaError, SchemaResult};
pub use registry::{Registry, RegistryPolicy};
