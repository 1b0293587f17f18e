//! Field group registration.
//!
//! [`Registry`] walks a set of field group configs and synthesizes schema
//! types into a [`SchemaSink`]: one object type per group, a `{Type}_Fields`
//! interface carrying the group's fields, and a memoized `With{Type}`
//! attachment interface exposing the group on its host types. Registration
//! is idempotent; the [`RegisteredTypeIndex`] terminates recursion on clone
//! cycles.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use log::{debug, info, warn};
use serde_json::Value as JsonValue;

use crate::config::{ConfigIndex, Field, FieldGroup, FieldKind};
use crate::field_config::FieldConfig;
use crate::host::HostTypeCatalog;
use crate::kind::{FieldKindRegistry, GOOGLE_MAP_TYPE_NAME, LINK_TYPE_NAME};
use crate::location::resolve_locations;
use crate::names;
use crate::resolve::ParentValue;
use crate::schema::{FieldDefinition, InterfaceType, ObjectType, SchemaSink, TypeRef};

/// Marker interface every synthesized object type implements.
pub const FIELD_GROUP_INTERFACE: &str = "FieldGroup";
/// Marker interface every `{Type}_Fields` interface implements.
pub const FIELD_GROUP_FIELDS_INTERFACE: &str = "FieldGroupFields";
/// Deprecated provenance field present on every synthesized type.
pub const GROUP_NAME_FIELD: &str = "fieldGroupName";

/// Default visibility applied when a group carries no explicit flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityDefault {
    Show,
    Hide,
    /// Fall back to the group's REST-style visibility flag
    InheritRest,
}

/// Registry-wide defaults for group visibility.
#[derive(Debug, Clone, Copy)]
pub struct RegistryPolicy {
    pub group_visibility: VisibilityDefault,
    pub options_group_visibility: VisibilityDefault,
}

impl Default for RegistryPolicy {
    fn default() -> Self {
        Self {
            group_visibility: VisibilityDefault::Show,
            options_group_visibility: VisibilityDefault::InheritRest,
        }
    }
}

impl RegistryPolicy {
    /// Whether a group should appear in the schema. An explicit
    /// `show_in_schema` flag always wins.
    pub fn group_is_visible(&self, group: &FieldGroup) -> bool {
        if let Some(flag) = group.show_in_schema {
            return flag;
        }
        let default = if group.is_options_group() {
            self.options_group_visibility
        } else {
            self.group_visibility
        };
        match default {
            VisibilityDefault::Show => true,
            VisibilityDefault::Hide => false,
            VisibilityDefault::InheritRest => group.show_in_rest.unwrap_or(true),
        }
    }
}

/// Memo of type names already registered, keyed back to the group that
/// produced each.
#[derive(Debug, Default, Clone)]
pub struct RegisteredTypeIndex {
    entries: BTreeMap<String, Option<String>>,
}

impl RegisteredTypeIndex {
    pub fn contains(&self, type_name: &str) -> bool {
        self.entries.contains_key(type_name)
    }

    pub fn insert(&mut self, type_name: impl Into<String>, group_key: Option<&str>) {
        self.entries
            .insert(type_name.into(), group_key.map(str::to_string));
    }

    /// The key of the group that produced a type, if it came from one.
    pub fn group_for(&self, type_name: &str) -> Option<&str> {
        self.entries.get(type_name)?.as_deref()
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Drives schema synthesis for a set of field groups.
pub struct Registry {
    kinds: FieldKindRegistry,
    catalog: HostTypeCatalog,
    policy: RegistryPolicy,
    registered: RegisteredTypeIndex,
    connections: BTreeSet<(String, String)>,
    index: ConfigIndex,
}

impl Registry {
    pub fn new(kinds: FieldKindRegistry, catalog: HostTypeCatalog) -> Self {
        Self {
            kinds,
            catalog,
            policy: RegistryPolicy::default(),
            registered: RegisteredTypeIndex::default(),
            connections: BTreeSet::new(),
            index: ConfigIndex::new(),
        }
    }

    pub fn with_policy(mut self, policy: RegistryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn kind_registry(&self) -> &FieldKindRegistry {
        &self.kinds
    }

    pub fn config_index(&self) -> &ConfigIndex {
        &self.index
    }

    pub fn registered_types(&self) -> &RegisteredTypeIndex {
        &self.registered
    }

    pub fn is_type_registered(&self, type_name: &str) -> bool {
        self.registered.contains(type_name)
    }

    pub fn mark_type_registered(&mut self, type_name: &str, group_key: Option<&str>) {
        self.registered.insert(type_name, group_key);
    }

    /// Whether a connection has already been registered from a type under a
    /// field name. A group's own pass and a clone of that group both reach
    /// the same reference field; the memo keeps the sink to one entry per
    /// (type, field) pair.
    pub fn is_connection_registered(&self, from_type: &str, field_name: &str) -> bool {
        self.connections
            .contains(&(from_type.to_string(), field_name.to_string()))
    }

    pub fn mark_connection_registered(&mut self, from_type: &str, field_name: &str) {
        self.connections
            .insert((from_type.to_string(), field_name.to_string()));
    }

    /// The schema type name a group registers under, derived from its
    /// display name.
    pub fn group_type_name(&self, group: &FieldGroup) -> Option<String> {
        names::format_type_name(group.display_name())
    }

    /// The schema field name a field exposes, derived from its display name.
    pub fn field_name(&self, field: &Field) -> Option<String> {
        names::format_field_name(field.display_name())
    }

    /// Registers every visible group of the set into the sink.
    ///
    /// The whole set is indexed up front so clone fields can resolve their
    /// targets structurally, regardless of registration order.
    pub fn register_field_groups<S: SchemaSink>(&mut self, groups: &[FieldGroup], sink: &mut S) {
        self.index.extend(groups);
        self.register_base_interfaces(sink);

        let mut visible = 0usize;
        for group in groups {
            if !self.policy.group_is_visible(group) {
                debug!("field group \"{}\" is hidden from the schema", group.key);
                continue;
            }
            self.register_group(group, sink);
            visible += 1;
        }
        info!(
            "registration pass complete: {visible} of {} field groups visible",
            groups.len()
        );
    }

    /// Registers one group: its `{Type}_Fields` interface, its object type,
    /// and, when it attaches anywhere, its `With{Type}` interface. Safe to
    /// call repeatedly with the same group.
    pub fn register_group<S: SchemaSink>(&mut self, group: &FieldGroup, sink: &mut S) {
        let Some(type_name) = self.group_type_name(group) else {
            warn!(
                "skipping field group \"{}\": display name {:?} is not a valid type name",
                group.key,
                group.display_name()
            );
            return;
        };
        if self.is_type_registered(&type_name) {
            return;
        }
        // Mark before recursing so clone cycles terminate.
        self.mark_type_registered(&type_name, Some(&group.key));

        let locations = resolve_locations(group, &self.catalog);
        let (fields, clone_interfaces) = self.fields_for_group(group, &type_name, sink);
        if fields.len() <= 1 {
            // Only the provenance field: nothing to expose.
            warn!(
                "field group \"{}\" synthesized no fields; type \"{}\" not registered",
                group.key, type_name
            );
            return;
        }

        let mut interfaces: Vec<String> = vec![FIELD_GROUP_INTERFACE.to_string()];
        for extra in group.interfaces.iter().chain(clone_interfaces.iter()) {
            if !interfaces.contains(extra) {
                interfaces.push(extra.clone());
            }
        }

        if !locations.is_empty() {
            self.register_attachment_interface(group, &type_name, &locations, sink);
        }

        let fields_interface = self.register_fields_interface(
            group,
            &type_name,
            &interfaces,
            &locations,
            fields.clone(),
            sink,
        );
        interfaces.push(fields_interface);

        let object = ObjectType {
            name: type_name.clone(),
            interfaces,
            fields,
            locations,
            group_key: Some(group.key.clone()),
            description: Some(format!(
                "The \"{}\" field group",
                group.display_name()
            )),
        };
        match sink.register_object_type(object) {
            Ok(()) => debug!("registered object type \"{type_name}\" for group \"{}\"", group.key),
            Err(err) => warn!("object type \"{type_name}\" not registered: {err}"),
        }
    }

    /// Synthesizes the group's field set. Non-clone fields are synthesized
    /// first; clone expansions merge in afterwards, so a group's own field
    /// wins a name collision with a cloned one.
    fn fields_for_group<S: SchemaSink>(
        &mut self,
        group: &FieldGroup,
        type_name: &str,
        sink: &mut S,
    ) -> (BTreeMap<String, FieldDefinition>, Vec<String>) {
        let mut fields = BTreeMap::new();
        fields.insert(
            GROUP_NAME_FIELD.to_string(),
            group_name_field(group.display_name()),
        );

        for field in &group.fields {
            if field.kind == FieldKind::Clone {
                continue;
            }
            if !self.kinds.is_supported(field.kind) {
                warn!(
                    "field \"{}\" has unsupported kind \"{}\"; skipped",
                    field.key, field.kind
                );
                continue;
            }
            let config = FieldConfig::new(field.clone(), group, type_name);
            if let Some(definition) = config.field_definition(self, sink) {
                fields.insert(definition.name.clone(), definition);
            }
        }

        let mut clone_interfaces = Vec::new();
        for field in &group.fields {
            if field.kind != FieldKind::Clone || !field.show_in_schema {
                continue;
            }
            let config = FieldConfig::new(field.clone(), group, type_name);
            let expansion = config.clone_expansion(self, sink);
            for definition in expansion.fields {
                fields
                    .entry(definition.name.clone())
                    .or_insert(definition);
            }
            for interface in expansion.interfaces {
                if !clone_interfaces.contains(&interface) {
                    clone_interfaces.push(interface);
                }
            }
        }

        (fields, clone_interfaces)
    }

    /// Registers the memoized `With{Type}` interface and attaches it to the
    /// group's resolved host types.
    fn register_attachment_interface<S: SchemaSink>(
        &mut self,
        group: &FieldGroup,
        type_name: &str,
        locations: &[String],
        sink: &mut S,
    ) {
        let with_interface = format!("With{type_name}");
        if !self.is_type_registered(&with_interface) {
            let Some(field_name) = names::format_field_name(type_name) else {
                return;
            };
            let group_key = group.key.clone();
            let options_slug = group.options_slug.clone();
            let resolver: crate::schema::ResolverFn = Arc::new(move |parent, _ctx| {
                let child = match &options_slug {
                    Some(slug) => ParentValue::for_options(slug),
                    None => match &parent.entity_id {
                        Some(id) => ParentValue::for_entity(id.clone()),
                        None => return None,
                    },
                };
                Some(child.with_group_key(group_key.clone()).into_value())
            });

            let mut fields = BTreeMap::new();
            fields.insert(
                field_name.clone(),
                FieldDefinition::new(field_name.clone(), TypeRef::named(type_name))
                    .with_description(format!(
                        "Fields of the \"{}\" field group",
                        group.display_name()
                    ))
                    .with_resolver(resolver),
            );

            let interface = InterfaceType {
                name: with_interface.clone(),
                interfaces: Vec::new(),
                fields,
                locations: locations.to_vec(),
                group_key: Some(group.key.clone()),
                description: Some(format!(
                    "Provides access to the \"{}\" field group via the \"{field_name}\" field",
                    group.display_name()
                )),
                type_resolver: None,
            };
            match sink.register_interface_type(interface) {
                Ok(()) => self.mark_type_registered(&with_interface, Some(&group.key)),
                Err(err) => {
                    warn!("attachment interface \"{with_interface}\" not registered: {err}");
                    return;
                }
            }
        }
        sink.attach_interfaces(std::slice::from_ref(&with_interface), locations);
    }

    /// Registers the memoized `{Type}_Fields` interface carrying the
    /// group's fields, returning its name.
    fn register_fields_interface<S: SchemaSink>(
        &mut self,
        group: &FieldGroup,
        type_name: &str,
        interfaces: &[String],
        locations: &[String],
        fields: BTreeMap<String, FieldDefinition>,
        sink: &mut S,
    ) -> String {
        let fields_interface = format!("{type_name}_Fields");
        if self.is_type_registered(&fields_interface) {
            return fields_interface;
        }

        let mut interface_interfaces: Vec<String> = interfaces.to_vec();
        if !interface_interfaces
            .iter()
            .any(|i| i == FIELD_GROUP_FIELDS_INTERFACE)
        {
            interface_interfaces.push(FIELD_GROUP_FIELDS_INTERFACE.to_string());
        }
        // The marker is for _Fields interfaces; the object-type marker does
        // not belong here.
        interface_interfaces.retain(|i| i != FIELD_GROUP_INTERFACE);

        let interface = InterfaceType {
            name: fields_interface.clone(),
            interfaces: interface_interfaces,
            fields,
            locations: locations.to_vec(),
            group_key: Some(group.key.clone()),
            description: Some(format!(
                "Fields of the \"{}\" field group",
                group.display_name()
            )),
            type_resolver: None,
        };
        match sink.register_interface_type(interface) {
            Ok(()) => self.mark_type_registered(&fields_interface, Some(&group.key)),
            Err(err) => warn!("interface \"{fields_interface}\" not registered: {err}"),
        }
        fields_interface
    }

    /// Registers the base marker interfaces once per sink.
    fn register_base_interfaces<S: SchemaSink>(&mut self, sink: &mut S) {
        for name in [FIELD_GROUP_INTERFACE, FIELD_GROUP_FIELDS_INTERFACE] {
            if self.is_type_registered(name) {
                continue;
            }
            let mut fields = BTreeMap::new();
            fields.insert(
                GROUP_NAME_FIELD.to_string(),
                FieldDefinition::new(GROUP_NAME_FIELD, TypeRef::named("String"))
                    .with_description("The name of the field group")
                    .with_deprecation("Use type introspection instead"),
            );
            let interface = InterfaceType {
                name: name.to_string(),
                interfaces: Vec::new(),
                fields,
                locations: Vec::new(),
                group_key: None,
                description: Some("Marker interface for synthesized field group types".to_string()),
                type_resolver: None,
            };
            match sink.register_interface_type(interface) {
                Ok(()) => self.mark_type_registered(name, None),
                Err(err) => warn!("base interface \"{name}\" not registered: {err}"),
            }
        }
    }

    /// Registers a shared, kind-owned type the first time a field needs it.
    pub(crate) fn ensure_shared_type<S: SchemaSink>(&mut self, type_name: &str, sink: &mut S) {
        if self.is_type_registered(type_name) {
            return;
        }
        let (fields, description) = match type_name {
            LINK_TYPE_NAME => (link_fields(), "A link with a url, title and target"),
            GOOGLE_MAP_TYPE_NAME => (google_map_fields(), "A location picked on a map"),
            _ => return,
        };
        let object = ObjectType {
            name: type_name.to_string(),
            interfaces: Vec::new(),
            fields,
            locations: Vec::new(),
            group_key: None,
            description: Some(description.to_string()),
        };
        match sink.register_object_type(object) {
            Ok(()) => self.mark_type_registered(type_name, None),
            Err(err) => warn!("shared type \"{type_name}\" not registered: {err}"),
        }
    }
}

fn link_fields() -> BTreeMap<String, FieldDefinition> {
    let mut fields = BTreeMap::new();
    for name in ["url", "title", "target"] {
        fields.insert(
            name.to_string(),
            FieldDefinition::new(name, TypeRef::named("String"))
                .with_resolver(passthrough_resolver(name)),
        );
    }
    fields
}

fn google_map_fields() -> BTreeMap<String, FieldDefinition> {
    // Schema field name paired with the key the store writes.
    let mut fields = BTreeMap::new();
    for (name, key) in [
        ("streetAddress", "address"),
        ("streetNumber", "street_number"),
        ("streetName", "street_name"),
        ("city", "city"),
        ("state", "state"),
        ("postCode", "post_code"),
        ("country", "country"),
        ("countryShort", "country_short"),
        ("placeId", "place_id"),
        ("zoom", "zoom"),
    ] {
        fields.insert(
            name.to_string(),
            FieldDefinition::new(name, TypeRef::named("String"))
                .with_resolver(passthrough_resolver(key)),
        );
    }
    for (name, key) in [("latitude", "lat"), ("longitude", "lng")] {
        fields.insert(
            name.to_string(),
            FieldDefinition::new(name, TypeRef::named("Float"))
                .with_resolver(passthrough_resolver(key)),
        );
    }
    fields
}

/// The deprecated provenance field carried by every synthesized type.
fn group_name_field(group_name: &str) -> FieldDefinition {
    let name = group_name.to_string();
    FieldDefinition::new(GROUP_NAME_FIELD, TypeRef::named("String"))
        .with_description("The name of the field group")
        .with_deprecation("Use type introspection instead")
        .with_resolver(Arc::new(move |_parent, _ctx| {
            Some(JsonValue::String(name.clone()))
        }))
}

/// Reads a key straight out of the parent's pre-loaded values.
fn passthrough_resolver(key: &'static str) -> crate::schema::ResolverFn {
    Arc::new(move |parent, _ctx| parent.get(key).cloned())
}
