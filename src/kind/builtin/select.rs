use crate::config::FieldKind;
use crate::kind::{CoercionClass, FieldKindDefinition, ScalarType, TypeSource};

/// Select always exposes a list of String; a single stored choice is
/// wrapped on resolution.
pub(super) fn definition() -> FieldKindDefinition {
    FieldKindDefinition {
        kind: FieldKind::Select,
        type_source: TypeSource::ScalarList(ScalarType::String),
        should_format: true,
        coercion: CoercionClass::MultiValue,
        admin: None,
    }
}
