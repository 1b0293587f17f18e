use crate::config::FieldKind;
use crate::kind::{FieldKindDefinition, TypeSource};

use super::GOOGLE_MAP_TYPE_NAME;

/// Map picks resolve to the shared `GoogleMap` object type (address parts
/// plus coordinates), registered once by the registry.
pub(super) fn definition() -> FieldKindDefinition {
    FieldKindDefinition {
        kind: FieldKind::GoogleMap,
        type_source: TypeSource::Named(GOOGLE_MAP_TYPE_NAME),
        should_format: false,
        coercion: crate::kind::CoercionClass::None,
        admin: None,
    }
}
