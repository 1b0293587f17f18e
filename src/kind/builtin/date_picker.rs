use crate::config::FieldKind;
use crate::kind::{CoercionClass, FieldKindDefinition, ScalarType};

/// Stored dates are parsed with the field's input format and re-emitted in
/// the canonical `%Y-%m-%d` form; unparseable values resolve to null.
pub(super) fn definition() -> FieldKindDefinition {
    FieldKindDefinition::scalar(FieldKind::DatePicker, ScalarType::String)
        .with_coercion(CoercionClass::Date)
}
