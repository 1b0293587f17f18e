use crate::config::FieldKind;
use crate::kind::{CoercionClass, FieldKindDefinition, TypeSource};

/// A one-to-many relationship to other host entities, exposed purely as a
/// registered connection.
pub(super) fn definition() -> FieldKindDefinition {
    FieldKindDefinition {
        kind: FieldKind::Relationship,
        type_source: TypeSource::Connection {
            default_to_type: "ContentNode",
            one_to_one: false,
        },
        should_format: false,
        coercion: CoercionClass::None,
        admin: None,
    }
}
