use crate::config::FieldKind;
use crate::kind::{FieldKindDefinition, ScalarType};

/// Textarea values optionally pass through line-break conversion, driven by
/// the field's `line_breaks` config rather than the kind definition.
pub(super) fn definition() -> FieldKindDefinition {
    FieldKindDefinition::scalar(FieldKind::Textarea, ScalarType::String)
}
