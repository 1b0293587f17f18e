use crate::config::FieldKind;
use crate::kind::{CoercionClass, FieldKindDefinition, TypeSource};

/// Same child-group derivation as `group`, but the synthesized type is a
/// list of the derived row type.
pub(super) fn definition() -> FieldKindDefinition {
    FieldKindDefinition {
        kind: FieldKind::Repeater,
        type_source: TypeSource::Structural,
        should_format: false,
        coercion: CoercionClass::None,
        admin: None,
    }
}
