use crate::config::FieldKind;
use crate::kind::{CoercionClass, FieldKindDefinition, TypeSource};

pub(super) fn definition() -> FieldKindDefinition {
    FieldKindDefinition {
        kind: FieldKind::Image,
        type_source: TypeSource::Connection {
            default_to_type: "MediaItem",
            one_to_one: true,
        },
        should_format: false,
        coercion: CoercionClass::None,
        admin: None,
    }
}
