use crate::config::FieldKind;
use crate::kind::{CoercionClass, FieldKindDefinition, ScalarType};

pub(super) fn definition() -> FieldKindDefinition {
    FieldKindDefinition::scalar(FieldKind::Range, ScalarType::Float)
        .with_coercion(CoercionClass::Numeric)
}
