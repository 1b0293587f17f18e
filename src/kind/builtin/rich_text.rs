use crate::config::FieldKind;
use crate::kind::{CoercionClass, FieldKindDefinition, ScalarType};

/// Rich text is stored in a raw representation that the external store
/// expands on fetch, so the format flag is set.
pub(super) fn definition() -> FieldKindDefinition {
    FieldKindDefinition::scalar(FieldKind::RichText, ScalarType::String)
        .with_format()
        .with_coercion(CoercionClass::RichText)
}
