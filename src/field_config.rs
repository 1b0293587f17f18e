//! Per-field schema synthesis.
//!
//! [`FieldConfig`] converts one field, in the context of its owning group,
//! into a synthesized [`FieldDefinition`]: it dispatches on the field kind
//! to decide the schema type (recursing into the [`Registry`] for nested
//! structures), wires up the runtime resolver, and owns clone expansion.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::warn;
use serde_json::Value as JsonValue;

use crate::config::{Field, FieldGroup, FieldKind};
use crate::kind::{FieldKindDefinition, TypeSource};
use crate::names;
use crate::registry::Registry;
use crate::resolve::{resolve_field_value, ParentValue, ENTITY_ID_KEY};
use crate::schema::{
    ConnectionConfig, FieldDefinition, InterfaceType, ResolverFn, SchemaSink, TypeRef,
    TypeResolverFn,
};

/// Outcome of type synthesis for one field.
enum SynthesizedType {
    /// The field has an inline schema type
    Inline(TypeRef),
    /// The field registered a connection and exposes no inline type
    Connection,
    /// The field could not be synthesized and is skipped
    Skipped,
}

/// Fields and interfaces a clone field contributes to its parent type.
#[derive(Debug, Default)]
pub struct CloneExpansion {
    pub fields: Vec<FieldDefinition>,
    pub interfaces: Vec<String>,
}

/// One field paired with the group context it is being synthesized in.
pub struct FieldConfig {
    field: Field,
    group_key: String,
    group_type_name: String,
    /// Overrides the `from_type` of a registered connection. Set when a
    /// clone re-synthesizes a reference field, so the connection hangs off
    /// the cloning type rather than the target group's.
    connection_from: Option<String>,
}

impl FieldConfig {
    pub fn new(field: Field, group: &FieldGroup, group_type_name: &str) -> Self {
        Self {
            field,
            group_key: group.key.clone(),
            group_type_name: group_type_name.to_string(),
            connection_from: None,
        }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Synthesizes the full field definition, or `None` when the field is
    /// hidden, unsupported, invalidly named, or exposed purely as a
    /// connection.
    pub fn field_definition<S: SchemaSink>(
        &self,
        registry: &mut Registry,
        sink: &mut S,
    ) -> Option<FieldDefinition> {
        if !self.field.show_in_schema {
            return None;
        }
        let definition = registry.kind_registry().get(self.field.kind)?.clone();

        let Some(field_name) = names::format_field_name(self.field.display_name()) else {
            warn!(
                "skipping field \"{}\": name {:?} is not a valid schema field name",
                self.field.key,
                self.field.display_name()
            );
            return None;
        };

        let type_ref = match self.synthesize_type(&definition, &field_name, registry, sink) {
            SynthesizedType::Inline(type_ref) => type_ref,
            SynthesizedType::Connection | SynthesizedType::Skipped => return None,
        };

        let description = self
            .field
            .schema_description()
            .map(str::to_string)
            .unwrap_or_else(|| {
                format!("Field of the \"{}\" field group", self.group_type_name)
            });

        Some(
            FieldDefinition::new(field_name, type_ref)
                .with_description(description)
                .with_resolver(self.make_resolver(&definition)),
        )
    }

    /// Dispatches on the field kind to produce the schema type.
    fn synthesize_type<S: SchemaSink>(
        &self,
        definition: &FieldKindDefinition,
        field_name: &str,
        registry: &mut Registry,
        sink: &mut S,
    ) -> SynthesizedType {
        match &definition.type_source {
            TypeSource::Scalar(scalar) => {
                SynthesizedType::Inline(TypeRef::named(scalar.as_str()))
            }
            TypeSource::ScalarList(scalar) => {
                SynthesizedType::Inline(TypeRef::list_of(TypeRef::named(scalar.as_str())))
            }
            TypeSource::Named(type_name) => {
                registry.ensure_shared_type(type_name, sink);
                SynthesizedType::Inline(TypeRef::named(*type_name))
            }
            TypeSource::Structural => match self.field.kind {
                FieldKind::Group => match self.synthesize_child_group(field_name, registry, sink)
                {
                    Some(child) => SynthesizedType::Inline(TypeRef::named(child)),
                    None => SynthesizedType::Skipped,
                },
                FieldKind::Repeater => {
                    match self.synthesize_child_group(field_name, registry, sink) {
                        Some(child) => {
                            SynthesizedType::Inline(TypeRef::list_of(TypeRef::named(child)))
                        }
                        None => SynthesizedType::Skipped,
                    }
                }
                FieldKind::FlexibleContent => {
                    match self.synthesize_flex_content(field_name, registry, sink) {
                        Some(type_ref) => SynthesizedType::Inline(type_ref),
                        None => SynthesizedType::Skipped,
                    }
                }
                // Clone fields are expanded into the parent's field set by
                // the registry, never synthesized inline.
                _ => SynthesizedType::Skipped,
            },
            TypeSource::Connection {
                default_to_type,
                one_to_one,
            } => {
                let from_type = self
                    .connection_from
                    .clone()
                    .unwrap_or_else(|| self.group_type_name.clone());
                if registry.is_connection_registered(&from_type, field_name) {
                    return SynthesizedType::Connection;
                }
                let to_type = self
                    .field
                    .to_type
                    .clone()
                    .unwrap_or_else(|| (*default_to_type).to_string());
                let connection = ConnectionConfig {
                    from_type: from_type.clone(),
                    field_name: field_name.to_string(),
                    to_type,
                    one_to_one: *one_to_one,
                    resolver: self.make_connection_resolver(definition),
                };
                if let Err(err) = sink.register_connection(connection) {
                    warn!(
                        "failed to register connection for field \"{}\": {}",
                        self.field.key, err
                    );
                    return SynthesizedType::Skipped;
                }
                registry.mark_connection_registered(&from_type, field_name);
                SynthesizedType::Connection
            }
        }
    }

    /// Derives and registers the synthetic child group backing a `group` or
    /// `repeater` field, returning the child type name.
    fn synthesize_child_group<S: SchemaSink>(
        &self,
        field_name: &str,
        registry: &mut Registry,
        sink: &mut S,
    ) -> Option<String> {
        let child_type_name =
            names::format_type_name(&format!("{} {}", self.group_type_name, field_name))?;
        let child = self.derive_child_group(&child_type_name, self.field.sub_fields.clone());
        registry.register_group(&child, sink);
        Some(child_type_name)
    }

    /// Synthesizes the layout interface and per-layout types of a
    /// flexible-content field, returning list-of-interface.
    fn synthesize_flex_content<S: SchemaSink>(
        &self,
        field_name: &str,
        registry: &mut Registry,
        sink: &mut S,
    ) -> Option<TypeRef> {
        let prefix =
            names::format_type_name(&format!("{} {}", self.group_type_name, field_name))?;
        let layout_interface = format!("{prefix}_Layout");

        if !registry.is_type_registered(&layout_interface) {
            let resolver_prefix = prefix.clone();
            let type_resolver: TypeResolverFn = Arc::new(move |parent| {
                parent
                    .layout_slug()
                    .and_then(|slug| names::format_type_name(&format!("{resolver_prefix} {slug}")))
            });

            let mut fields = BTreeMap::new();
            fields.insert(
                crate::registry::GROUP_NAME_FIELD.to_string(),
                FieldDefinition::new(crate::registry::GROUP_NAME_FIELD, TypeRef::named("String"))
                    .with_description("The name of the layout")
                    .with_deprecation("Use type introspection instead")
                    .with_resolver(Arc::new(|parent, _ctx| {
                        parent.layout_slug().map(|slug| JsonValue::String(slug.to_string()))
                    })),
            );

            let interface = InterfaceType {
                name: layout_interface.clone(),
                interfaces: Vec::new(),
                fields,
                locations: Vec::new(),
                group_key: None,
                description: Some(format!(
                    "Layout of the \"{}\" field of the \"{}\" field group",
                    field_name, self.group_type_name
                )),
                type_resolver: Some(type_resolver),
            };
            if let Err(err) = sink.register_interface_type(interface) {
                warn!("failed to register layout interface {layout_interface}: {err}");
                return None;
            }
            registry.mark_type_registered(&layout_interface, None);
        }

        for layout in &self.field.layouts {
            let Some(layout_type) =
                names::format_type_name(&format!("{} {}", prefix, layout.title()))
            else {
                warn!(
                    "skipping layout \"{}\" of field \"{}\": name is not a valid type name",
                    layout.name, self.field.key
                );
                continue;
            };
            let mut child = self.derive_child_group(&layout_type, layout.sub_fields.clone());
            child.key = layout.key.clone();
            child.is_layout = true;
            child.interfaces.push(layout_interface.clone());
            registry.register_group(&child, sink);
        }

        Some(TypeRef::list_of(TypeRef::named(layout_interface)))
    }

    /// Expands a clone field into the fields and interfaces it contributes
    /// to the parent type.
    ///
    /// Whole-group targets without a name prefix are schema-transparent:
    /// their fields merge into the parent and their `_Fields` interface is
    /// contributed for the parent to implement. With a prefix, a nested
    /// type is synthesized instead, exactly like `group`. Individual field
    /// targets are re-synthesized directly into the parent.
    pub fn clone_expansion<S: SchemaSink>(
        &self,
        registry: &mut Registry,
        sink: &mut S,
    ) -> CloneExpansion {
        let mut expansion = CloneExpansion::default();
        if self.field.kind != FieldKind::Clone {
            return expansion;
        }

        // Resolve every target against the pre-built config index before
        // registering anything, so recursion stays structural.
        let mut group_targets: Vec<FieldGroup> = Vec::new();
        let mut field_targets: Vec<(Field, Option<FieldGroup>)> = Vec::new();
        for target_key in &self.field.clone {
            if let Some(group) = registry.config_index().group(target_key) {
                group_targets.push(group.clone());
            } else if let Some(field) = registry.config_index().field(target_key) {
                let owner = registry.config_index().group_of_field(target_key).cloned();
                field_targets.push((field.clone(), owner));
            } else {
                warn!(
                    "clone field \"{}\" references unknown key \"{}\"; target skipped",
                    self.field.key, target_key
                );
            }
        }

        if self.field.prefix_name {
            self.expand_prefixed_clone(group_targets, field_targets, registry, sink, &mut expansion);
        } else {
            self.expand_transparent_clone(
                group_targets,
                field_targets,
                registry,
                sink,
                &mut expansion,
            );
        }
        expansion
    }

    fn expand_transparent_clone<S: SchemaSink>(
        &self,
        group_targets: Vec<FieldGroup>,
        field_targets: Vec<(Field, Option<FieldGroup>)>,
        registry: &mut Registry,
        sink: &mut S,
        expansion: &mut CloneExpansion,
    ) {
        for target in group_targets {
            let Some(target_type) = registry.group_type_name(&target) else {
                warn!(
                    "clone field \"{}\": target group \"{}\" has no valid type name",
                    self.field.key, target.key
                );
                continue;
            };
            // Make sure the cloned group's own types exist before the
            // parent claims its interface.
            registry.register_group(&target, sink);
            let contributed = format!("{target_type}_Fields");
            // A target that synthesized no fields never put its interface
            // into the sink; the parent must not claim it.
            if registry.is_type_registered(&contributed)
                && !expansion.interfaces.contains(&contributed)
            {
                expansion.interfaces.push(contributed);
            }

            for field in &target.fields {
                self.re_synthesize_into_parent(field, &target, &target_type, registry, sink, expansion);
            }
        }

        for (field, owner) in field_targets {
            let (owner_group, owner_type) = match owner
                .as_ref()
                .and_then(|g| registry.group_type_name(g).map(|t| (g, t)))
            {
                Some((group, type_name)) => (group.clone(), type_name),
                // Fall back to the cloning group's own context.
                None => (
                    FieldGroup::new(self.group_key.clone(), self.group_type_name.clone()),
                    self.group_type_name.clone(),
                ),
            };
            self.re_synthesize_into_parent(&field, &owner_group, &owner_type, registry, sink, expansion);
        }
    }

    fn expand_prefixed_clone<S: SchemaSink>(
        &self,
        group_targets: Vec<FieldGroup>,
        field_targets: Vec<(Field, Option<FieldGroup>)>,
        registry: &mut Registry,
        sink: &mut S,
        expansion: &mut CloneExpansion,
    ) {
        let Some(field_name) = names::format_field_name(self.field.display_name()) else {
            warn!(
                "skipping clone field \"{}\": name {:?} is not a valid schema field name",
                self.field.key,
                self.field.display_name()
            );
            return;
        };
        let Some(child_type_name) =
            names::format_type_name(&format!("{} {}", self.group_type_name, field_name))
        else {
            return;
        };

        let mut cloned_fields: Vec<Field> = Vec::new();
        let mut cloned_interfaces: Vec<String> = Vec::new();
        for target in &group_targets {
            if let Some(target_type) = registry.group_type_name(target) {
                registry.register_group(target, sink);
                let contributed = format!("{target_type}_Fields");
                if registry.is_type_registered(&contributed) {
                    cloned_interfaces.push(contributed);
                }
            }
            cloned_fields.extend(target.fields.iter().map(clone_copy));
        }
        cloned_fields.extend(field_targets.into_iter().map(|(field, _)| clone_copy(&field)));

        if cloned_fields.is_empty() {
            warn!(
                "clone field \"{}\" resolved to no fields; skipped",
                self.field.key
            );
            return;
        }

        let mut child = self.derive_child_group(&child_type_name, cloned_fields);
        child.interfaces = cloned_interfaces;
        registry.register_group(&child, sink);

        let definition = match registry.kind_registry().get(FieldKind::Clone) {
            Some(def) => def.clone(),
            None => return,
        };
        expansion.fields.push(
            FieldDefinition::new(field_name, TypeRef::named(child_type_name))
                .with_description(format!(
                    "Fields cloned into the \"{}\" field group",
                    self.group_type_name
                ))
                .with_resolver(self.make_resolver(&definition)),
        );
    }

    /// Re-synthesizes one cloned field into the parent's field set,
    /// resolving against the original field's storage key and reusing the
    /// original group's type names so nested structures are shared, not
    /// duplicated.
    fn re_synthesize_into_parent<S: SchemaSink>(
        &self,
        original: &Field,
        owner_group: &FieldGroup,
        owner_type_name: &str,
        registry: &mut Registry,
        sink: &mut S,
        expansion: &mut CloneExpansion,
    ) {
        let copy = clone_copy(original);
        let mut config = FieldConfig::new(copy, owner_group, owner_type_name);
        // Connections the clone re-synthesizes belong to the cloning type.
        config.connection_from = Some(self.group_type_name.clone());
        if let Some(definition) = config.field_definition(registry, sink) {
            expansion.fields.push(definition);
        }
    }

    fn derive_child_group(&self, child_type_name: &str, fields: Vec<Field>) -> FieldGroup {
        let mut child = FieldGroup::new(self.field.key.clone(), child_type_name);
        child.type_name = Some(child_type_name.to_string());
        child.fields = fields;
        child.parent = Some(self.group_key.clone());
        // Derived sub-groups attach nowhere; they are reached through their
        // parent field.
        child.host_types = Some(Vec::new());
        child
    }

    /// Builds the runtime resolver for this field.
    fn make_resolver(&self, definition: &FieldKindDefinition) -> ResolverFn {
        let field = self.field.clone();
        let definition = definition.clone();
        Arc::new(move |parent, ctx| {
            let value = resolve_field_value(&field, &definition, parent, ctx)?;
            match field.kind {
                FieldKind::Group | FieldKind::Clone => Some(carry_entity_id(value, parent)),
                FieldKind::Repeater | FieldKind::FlexibleContent => Some(carry_entity_id_rows(value, parent)),
                _ => Some(value),
            }
        })
    }

    /// Builds the resolver backing a registered connection: it yields the
    /// list of target entity ids the external connection loader expands.
    fn make_connection_resolver(&self, definition: &FieldKindDefinition) -> ResolverFn {
        let field = self.field.clone();
        let definition = definition.clone();
        Arc::new(move |parent, ctx| {
            let value = resolve_field_value(&field, &definition, parent, ctx)?;
            let ids: Vec<JsonValue> = match value {
                JsonValue::Array(items) => items.into_iter().filter_map(extract_entity_id).collect(),
                other => extract_entity_id(other).into_iter().collect(),
            };
            if ids.is_empty() {
                None
            } else {
                Some(JsonValue::Array(ids))
            }
        })
    }
}

/// A copy of a cloned field that resolves against the original's storage
/// key. Clones never have independent storage.
fn clone_copy(original: &Field) -> Field {
    let mut copy = original.clone();
    if copy.cloned_from.is_none() {
        copy.cloned_from = Some(original.key.clone());
    }
    copy
}

/// Threads the host entity id into a composite value so nested resolvers
/// can keep fetching from the store.
fn carry_entity_id(value: JsonValue, parent: &ParentValue) -> JsonValue {
    match value {
        JsonValue::Object(mut object) => {
            if !object.contains_key(ENTITY_ID_KEY) {
                if let Some(id) = &parent.entity_id {
                    object.insert(ENTITY_ID_KEY.to_string(), JsonValue::String(id.clone()));
                }
            }
            JsonValue::Object(object)
        }
        other => other,
    }
}

fn carry_entity_id_rows(value: JsonValue, parent: &ParentValue) -> JsonValue {
    match value {
        JsonValue::Array(rows) => JsonValue::Array(
            rows.into_iter()
                .map(|row| carry_entity_id(row, parent))
                .collect(),
        ),
        other => other,
    }
}

/// Extracts an entity id from a stored reference value: either a bare
/// scalar id or an object carrying an `id` key.
fn extract_entity_id(value: JsonValue) -> Option<JsonValue> {
    match value {
        JsonValue::Object(object) => object.get("id").cloned(),
        JsonValue::Null => None,
        scalar => Some(scalar),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::LAYOUT_KEY;
    use serde_json::json;

    #[test]
    fn test_extract_entity_id_variants() {
        assert_eq!(extract_entity_id(json!(7)), Some(json!(7)));
        assert_eq!(extract_entity_id(json!({"id": 7, "title": "x"})), Some(json!(7)));
        assert_eq!(extract_entity_id(JsonValue::Null), None);
    }

    #[test]
    fn test_carry_entity_id_preserves_existing() {
        let parent = ParentValue::for_entity("99");
        let row = json!({ENTITY_ID_KEY: "1", "field_a": "x"});
        let carried = carry_entity_id(row, &parent);
        assert_eq!(carried[ENTITY_ID_KEY], json!("1"));

        let fresh = carry_entity_id(json!({"field_a": "x"}), &parent);
        assert_eq!(fresh[ENTITY_ID_KEY], json!("99"));
    }

    #[test]
    fn test_carry_entity_id_rows_maps_objects_only() {
        let parent = ParentValue::for_entity("99");
        let rows = json!([{"field_a": "x", LAYOUT_KEY: "hero"}, "scalar"]);
        let carried = carry_entity_id_rows(rows, &parent);
        assert_eq!(carried[0][ENTITY_ID_KEY], json!("99"));
        assert_eq!(carried[1], json!("scalar"));
    }
}
