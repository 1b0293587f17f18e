use crate::config::FieldKind;
use crate::kind::{FieldKindDefinition, TypeSource};

use super::LINK_TYPE_NAME;

/// Links resolve to the shared `Link` object type (url, title, target),
/// registered once by the registry.
pub(super) fn definition() -> FieldKindDefinition {
    FieldKindDefinition {
        kind: FieldKind::Link,
        type_source: TypeSource::Named(LINK_TYPE_NAME),
        should_format: false,
        coercion: crate::kind::CoercionClass::None,
        admin: None,
    }
}
