use crate::config::FieldKind;
use crate::kind::{CoercionClass, FieldKindDefinition, TypeSource};

/// Flexible content synthesizes one layout interface per field and one
/// object type per named layout; the value is a list of the interface.
pub(super) fn definition() -> FieldKindDefinition {
    FieldKindDefinition {
        kind: FieldKind::FlexibleContent,
        type_source: TypeSource::Structural,
        should_format: false,
        coercion: CoercionClass::None,
        admin: None,
    }
}
