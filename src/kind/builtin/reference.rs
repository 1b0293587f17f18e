use crate::config::FieldKind;
use crate::kind::{CoercionClass, FieldKindDefinition, TypeSource};

/// A one-to-one reference to another host entity, exposed purely as a
/// registered connection rather than an inline field type.
pub(super) fn definition() -> FieldKindDefinition {
    FieldKindDefinition {
        kind: FieldKind::Reference,
        type_source: TypeSource::Connection {
            default_to_type: "ContentNode",
            one_to_one: true,
        },
        should_format: false,
        coercion: CoercionClass::None,
        admin: None,
    }
}
