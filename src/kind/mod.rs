//! Field kind catalog.
//!
//! Maps each supported [`FieldKind`] to a [`FieldKindDefinition`]: the
//! schema type the kind synthesizes to, the coercion class its values go
//! through, the store-format flag, and inert admin metadata. The registry
//! is populated once at construction from the built-in definitions under
//! [`builtin`]; registering a kind twice is a logged no-op, not an error.

pub mod builtin;

pub use builtin::{GOOGLE_MAP_TYPE_NAME, LINK_TYPE_NAME};

use std::collections::BTreeMap;

use log::warn;

use crate::config::FieldKind;

/// Primitive schema types a scalar kind can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    String,
    Float,
    Int,
    Boolean,
    Id,
}

impl ScalarType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Float => "Float",
            Self::Int => "Int",
            Self::Boolean => "Boolean",
            Self::Id => "ID",
        }
    }
}

/// Where a kind's schema type comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSource {
    /// A fixed primitive type
    Scalar(ScalarType),
    /// A list of a fixed primitive type
    ScalarList(ScalarType),
    /// A fixed named object type (e.g. the shared `Link` type)
    Named(&'static str),
    /// The type is synthesized per field instance by recursing into the
    /// registry (group, repeater, flexible content, clone)
    Structural,
    /// The field registers a connection as a side effect and exposes no
    /// inline type
    Connection {
        default_to_type: &'static str,
        one_to_one: bool,
    },
}

/// Which coercion rules apply to a kind's raw stored values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoercionClass {
    None,
    Numeric,
    Date,
    Time,
    DateTime,
    /// Checkbox/select-like kinds that always resolve to a list
    MultiValue,
    RichText,
}

/// Admin-configuration metadata carried on a kind definition.
///
/// Inert at runtime; an external admin layer renders settings from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminMeta {
    pub settings_note: Option<&'static str>,
    pub excluded_settings: &'static [&'static str],
}

/// Everything the synthesis and resolution engines need to know about one
/// field kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldKindDefinition {
    pub kind: FieldKind,
    pub type_source: TypeSource,
    /// Whether store fetches for this kind ask for the expanded
    /// representation
    pub should_format: bool,
    pub coercion: CoercionClass,
    pub admin: Option<AdminMeta>,
}

impl FieldKindDefinition {
    /// A plain scalar kind with no special coercion.
    pub fn scalar(kind: FieldKind, scalar: ScalarType) -> Self {
        Self {
            kind,
            type_source: TypeSource::Scalar(scalar),
            should_format: false,
            coercion: CoercionClass::None,
            admin: None,
        }
    }

    pub fn with_coercion(mut self, coercion: CoercionClass) -> Self {
        self.coercion = coercion;
        self
    }

    pub fn with_format(mut self) -> Self {
        self.should_format = true;
        self
    }

    pub fn with_admin(mut self, admin: AdminMeta) -> Self {
        self.admin = Some(admin);
        self
    }
}

/// Process-wide catalog of field kind definitions.
#[derive(Debug, Clone, Default)]
pub struct FieldKindRegistry {
    kinds: BTreeMap<FieldKind, FieldKindDefinition>,
}

impl FieldKindRegistry {
    /// An empty registry. Most callers want
    /// [`with_builtin_kinds`](Self::with_builtin_kinds).
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry populated with every built-in kind definition.
    pub fn with_builtin_kinds() -> Self {
        let mut registry = Self::new();
        for definition in builtin::all_definitions() {
            registry.register(definition);
        }
        registry
    }

    /// Registers a kind definition. Registering an already-registered kind
    /// logs a diagnostic and keeps the existing definition.
    pub fn register(&mut self, definition: FieldKindDefinition) -> &FieldKindDefinition {
        let kind = definition.kind;
        if self.kinds.contains_key(&kind) {
            warn!(
                "field kind \"{}\" is already registered and cannot be registered twice; keeping the existing definition",
                kind
            );
        } else {
            self.kinds.insert(kind, definition);
        }
        &self.kinds[&kind]
    }

    pub fn get(&self, kind: FieldKind) -> Option<&FieldKindDefinition> {
        self.kinds.get(&kind)
    }

    /// Whether the kind is supported at all.
    pub fn is_supported(&self, kind: FieldKind) -> bool {
        self.kinds.contains_key(&kind)
    }

    /// All registered kinds.
    pub fn all_kinds(&self) -> Vec<FieldKind> {
        self.kinds.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_covers_every_kind() {
        let registry = FieldKindRegistry::with_builtin_kinds();
        for kind in FieldKind::all() {
            assert!(registry.is_supported(*kind), "missing builtin for {kind}");
        }
    }

    #[test]
    fn test_duplicate_registration_keeps_existing_definition() {
        let mut registry = FieldKindRegistry::new();
        registry.register(FieldKindDefinition::scalar(FieldKind::Text, ScalarType::String));
        let replacement =
            FieldKindDefinition::scalar(FieldKind::Text, ScalarType::Int).with_format();
        let kept = registry.register(replacement);
        assert_eq!(kept.type_source, TypeSource::Scalar(ScalarType::String));
        assert!(!kept.should_format);
    }

    #[test]
    fn test_format_flag_only_on_expanding_kinds() {
        let registry = FieldKindRegistry::with_builtin_kinds();
        assert!(registry.get(FieldKind::RichText).unwrap().should_format);
        assert!(registry.get(FieldKind::Select).unwrap().should_format);
        assert!(!registry.get(FieldKind::Text).unwrap().should_format);
        assert!(!registry.get(FieldKind::Number).unwrap().should_format);
    }
}
