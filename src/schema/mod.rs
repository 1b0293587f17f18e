//! Output side of synthesis: the type/interface/connection registrations
//! the registry emits into the external schema builder.
//!
//! The external builder is modeled as the [`SchemaSink`] trait; the crate
//! ships [`InMemorySchema`], a builder that holds the registered graph in
//! memory. It mirrors the external builder's strictness: registering the
//! same type name twice is an error, which is exactly what the registry's
//! memoization exists to prevent.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::error::SchemaError;
use crate::resolve::{ParentValue, ResolveContext};

/// Reference to a schema type, possibly wrapped in list modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn list_of(inner: TypeRef) -> Self {
        Self::List(Box::new(inner))
    }

    /// The underlying named type, stripped of list modifiers.
    pub fn base_name(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::List(inner) => inner.base_name(),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::List(inner) => write!(f, "[{inner}]"),
        }
    }
}

/// Runtime resolver attached to a synthesized field.
pub type ResolverFn =
    Arc<dyn Fn(&ParentValue, &ResolveContext<'_>) -> Option<JsonValue> + Send + Sync>;

/// Resolves which concrete type a polymorphic value belongs to (used by
/// flex-content layout interfaces).
pub type TypeResolverFn = Arc<dyn Fn(&ParentValue) -> Option<String> + Send + Sync>;

/// One synthesized field: name, type reference, docs, and resolver.
#[derive(Clone)]
pub struct FieldDefinition {
    pub name: String,
    pub type_ref: TypeRef,
    pub description: Option<String>,
    pub deprecation_reason: Option<String>,
    pub resolver: Option<ResolverFn>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            description: None,
            deprecation_reason: None,
            resolver: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_deprecation(mut self, reason: impl Into<String>) -> Self {
        self.deprecation_reason = Some(reason.into());
        self
    }

    pub fn with_resolver(mut self, resolver: ResolverFn) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Invokes the field's resolver, defaulting to null when none is set.
    pub fn resolve(&self, parent: &ParentValue, ctx: &ResolveContext<'_>) -> Option<JsonValue> {
        self.resolver.as_ref().and_then(|r| r(parent, ctx))
    }
}

impl fmt::Debug for FieldDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDefinition")
            .field("name", &self.name)
            .field("type_ref", &self.type_ref)
            .field("has_resolver", &self.resolver.is_some())
            .finish()
    }
}

/// A registered object type.
#[derive(Debug, Clone)]
pub struct ObjectType {
    pub name: String,
    pub interfaces: Vec<String>,
    pub fields: BTreeMap<String, FieldDefinition>,
    /// Informational: the host types this type's group attaches to
    pub locations: Vec<String>,
    /// The field group that produced this type, if any
    pub group_key: Option<String>,
    pub description: Option<String>,
}

/// A registered interface type.
#[derive(Clone)]
pub struct InterfaceType {
    pub name: String,
    pub interfaces: Vec<String>,
    pub fields: BTreeMap<String, FieldDefinition>,
    pub locations: Vec<String>,
    pub group_key: Option<String>,
    pub description: Option<String>,
    /// Concrete-type discriminator for polymorphic values
    pub type_resolver: Option<TypeResolverFn>,
}

impl fmt::Debug for InterfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterfaceType")
            .field("name", &self.name)
            .field("interfaces", &self.interfaces)
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field("has_type_resolver", &self.type_resolver.is_some())
            .finish()
    }
}

/// A registered connection between a synthesized type and a host type.
#[derive(Clone)]
pub struct ConnectionConfig {
    pub from_type: String,
    pub field_name: String,
    pub to_type: String,
    pub one_to_one: bool,
    /// Resolves the list of target entity ids the connection loads
    pub resolver: ResolverFn,
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("from_type", &self.from_type)
            .field("field_name", &self.field_name)
            .field("to_type", &self.to_type)
            .field("one_to_one", &self.one_to_one)
            .finish()
    }
}

/// The external schema builder's registration surface.
pub trait SchemaSink {
    fn register_object_type(&mut self, object: ObjectType) -> Result<(), SchemaError>;
    fn register_interface_type(&mut self, interface: InterfaceType) -> Result<(), SchemaError>;
    fn register_connection(&mut self, connection: ConnectionConfig) -> Result<(), SchemaError>;
    /// Attaches interfaces to host types, making a field group queryable
    /// from them.
    fn attach_interfaces(&mut self, interfaces: &[String], host_types: &[String]);
}

/// In-memory schema builder.
#[derive(Debug, Default)]
pub struct InMemorySchema {
    objects: BTreeMap<String, ObjectType>,
    interfaces: BTreeMap<String, InterfaceType>,
    connections: Vec<ConnectionConfig>,
    /// host type name -> interfaces attached to it
    attachments: BTreeMap<String, Vec<String>>,
}

impl InMemorySchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object(&self, name: &str) -> Option<&ObjectType> {
        self.objects.get(name)
    }

    pub fn interface(&self, name: &str) -> Option<&InterfaceType> {
        self.interfaces.get(name)
    }

    pub fn has_type(&self, name: &str) -> bool {
        self.objects.contains_key(name) || self.interfaces.contains_key(name)
    }

    pub fn object_names(&self) -> Vec<&str> {
        self.objects.keys().map(String::as_str).collect()
    }

    pub fn interface_names(&self) -> Vec<&str> {
        self.interfaces.keys().map(String::as_str).collect()
    }

    pub fn connections(&self) -> &[ConnectionConfig] {
        &self.connections
    }

    /// Interfaces attached to a host type, in attachment order.
    pub fn interfaces_for_host(&self, host_type: &str) -> &[String] {
        self.attachments
            .get(host_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Object types implementing the given interface.
    pub fn implementors_of(&self, interface: &str) -> Vec<&ObjectType> {
        self.objects
            .values()
            .filter(|object| object.interfaces.iter().any(|i| i == interface))
            .collect()
    }

    /// Looks up a field on an object type or on an interface attached to a
    /// host type.
    pub fn field(&self, type_name: &str, field_name: &str) -> Option<&FieldDefinition> {
        if let Some(object) = self.objects.get(type_name) {
            if let Some(field) = object.fields.get(field_name) {
                return Some(field);
            }
        }
        if let Some(interface) = self.interfaces.get(type_name) {
            if let Some(field) = interface.fields.get(field_name) {
                return Some(field);
            }
        }
        // Fall back to interfaces attached to the (host) type.
        self.interfaces_for_host(type_name)
            .iter()
            .find_map(|iface| self.interfaces.get(iface)?.fields.get(field_name))
    }

    /// Snapshot of the registered graph's shape, usable for equality checks
    /// across registration passes.
    pub fn shape(&self) -> BTreeMap<String, Vec<String>> {
        let mut shape = BTreeMap::new();
        for (name, object) in &self.objects {
            shape.insert(
                format!("object:{name}"),
                object.fields.keys().cloned().collect(),
            );
        }
        for (name, interface) in &self.interfaces {
            shape.insert(
                format!("interface:{name}"),
                interface.fields.keys().cloned().collect(),
            );
        }
        shape
    }
}

impl SchemaSink for InMemorySchema {
    fn register_object_type(&mut self, object: ObjectType) -> Result<(), SchemaError> {
        if self.has_type(&object.name) {
            return Err(SchemaError::DuplicateType {
                type_name: object.name,
            });
        }
        self.objects.insert(object.name.clone(), object);
        Ok(())
    }

    fn register_interface_type(&mut self, interface: InterfaceType) -> Result<(), SchemaError> {
        if self.has_type(&interface.name) {
            return Err(SchemaError::DuplicateType {
                type_name: interface.name,
            });
        }
        self.interfaces.insert(interface.name.clone(), interface);
        Ok(())
    }

    fn register_connection(&mut self, connection: ConnectionConfig) -> Result<(), SchemaError> {
        self.connections.push(connection);
        Ok(())
    }

    fn attach_interfaces(&mut self, interfaces: &[String], host_types: &[String]) {
        for host in host_types {
            let attached = self.attachments.entry(host.clone()).or_default();
            for interface in interfaces {
                if !attached.contains(interface) {
                    attached.push(interface.clone());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(name: &str) -> ObjectType {
        ObjectType {
            name: name.to_string(),
            interfaces: vec![],
            fields: BTreeMap::new(),
            locations: vec![],
            group_key: None,
            description: None,
        }
    }

    #[test]
    fn test_duplicate_object_registration_is_an_error() {
        let mut schema = InMemorySchema::new();
        schema.register_object_type(object("Hero")).unwrap();
        let err = schema.register_object_type(object("Hero")).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateType { type_name } if type_name == "Hero"));
    }

    #[test]
    fn test_attachments_are_deduplicated() {
        let mut schema = InMemorySchema::new();
        let interfaces = vec!["WithHero".to_string()];
        let hosts = vec!["Article".to_string()];
        schema.attach_interfaces(&interfaces, &hosts);
        schema.attach_interfaces(&interfaces, &hosts);
        assert_eq!(schema.interfaces_for_host("Article"), ["WithHero"]);
    }

    #[test]
    fn test_type_ref_display() {
        let list = TypeRef::list_of(TypeRef::named("HeroLayout"));
        assert_eq!(list.to_string(), "[HeroLayout]");
        assert_eq!(list.base_name(), "HeroLayout");
        assert!(list.is_list());
    }
}
