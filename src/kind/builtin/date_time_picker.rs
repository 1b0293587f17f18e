use crate::config::FieldKind;
use crate::kind::{CoercionClass, FieldKindDefinition, ScalarType};

pub(super) fn definition() -> FieldKindDefinition {
    FieldKindDefinition::scalar(FieldKind::DateTimePicker, ScalarType::String)
        .with_coercion(CoercionClass::DateTime)
}
