use crate::config::FieldKind;
use crate::kind::{CoercionClass, FieldKindDefinition, TypeSource};

pub(super) fn definition() -> FieldKindDefinition {
    FieldKindDefinition {
        kind: FieldKind::Gallery,
        type_source: TypeSource::Connection {
            default_to_type: "MediaItem",
            one_to_one: false,
        },
        should_format: false,
        coercion: CoercionClass::None,
        admin: None,
    }
}
