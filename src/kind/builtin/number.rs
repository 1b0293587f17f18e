use crate::config::FieldKind;
use crate::kind::{CoercionClass, FieldKindDefinition, ScalarType};

/// Numbers are stored as strings and cast to Float on resolution;
/// empty and zero-like values resolve to null.
pub(super) fn definition() -> FieldKindDefinition {
    FieldKindDefinition::scalar(FieldKind::Number, ScalarType::Float)
        .with_coercion(CoercionClass::Numeric)
}
