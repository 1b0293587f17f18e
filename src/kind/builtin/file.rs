use crate::config::FieldKind;
use crate::kind::{CoercionClass, FieldKindDefinition, TypeSource};

/// File fields expose a one-to-one connection to the media host type.
pub(super) fn definition() -> FieldKindDefinition {
    FieldKindDefinition {
        kind: FieldKind::File,
        type_source: TypeSource::Connection {
            default_to_type: "MediaItem",
            one_to_one: true,
        },
        should_format: false,
        coercion: CoercionClass::None,
        admin: None,
    }
}
