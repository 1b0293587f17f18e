use crate::config::FieldKind;
use crate::kind::{CoercionClass, FieldKindDefinition, TypeSource};

/// Groups derive a synthetic child field group named after the parent type
/// and the field; the synthesis lives in `FieldConfig`.
pub(super) fn definition() -> FieldKindDefinition {
    FieldKindDefinition {
        kind: FieldKind::Group,
        type_source: TypeSource::Structural,
        should_format: false,
        coercion: CoercionClass::None,
        admin: None,
    }
}
