use crate::config::FieldKind;
use crate::kind::{AdminMeta, CoercionClass, FieldKindDefinition, TypeSource};

/// Clone fields re-expose fields defined elsewhere and inherit their schema
/// settings from the cloned targets, so the usual per-field settings are
/// excluded from the admin surface.
pub(super) fn definition() -> FieldKindDefinition {
    FieldKindDefinition {
        kind: FieldKind::Clone,
        type_source: TypeSource::Structural,
        should_format: false,
        coercion: CoercionClass::None,
        admin: Some(AdminMeta {
            settings_note: Some(
                "Clone fields inherit their schema settings from the field(s) being cloned. \
                 Cloning every field of a group applies that group's interface to the parent type.",
            ),
            excluded_settings: &["show_in_schema", "field_name", "description"],
        }),
    }
}
