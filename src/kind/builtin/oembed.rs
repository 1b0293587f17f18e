use crate::config::FieldKind;
use crate::kind::{FieldKindDefinition, ScalarType};

pub(super) fn definition() -> FieldKindDefinition {
    FieldKindDefinition::scalar(FieldKind::Oembed, ScalarType::String)
}
