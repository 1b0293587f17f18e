use crate::config::FieldKind;
use crate::kind::{CoercionClass, FieldKindDefinition, ScalarType, TypeSource};

pub(super) fn definition() -> FieldKindDefinition {
    FieldKindDefinition {
        kind: FieldKind::Checkbox,
        type_source: TypeSource::ScalarList(ScalarType::String),
        should_format: false,
        coercion: CoercionClass::MultiValue,
        admin: None,
    }
}
