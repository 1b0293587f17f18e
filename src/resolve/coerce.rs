//! Type-specific coercion of raw stored values.
//!
//! Coercion never fails: an unparseable date or a non-numeric value in a
//! numeric field coerces to `None`, which the schema renders as null for
//! that field only.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::debug;
use serde_json::Value as JsonValue;

use crate::config::{Field, LineBreakMode};
use crate::kind::{CoercionClass, FieldKindDefinition};

/// Canonical output formats for the date/time kinds.
pub const DATE_OUTPUT_FORMAT: &str = "%Y-%m-%d";
pub const TIME_OUTPUT_FORMAT: &str = "%H:%M:%S";
pub const DATE_TIME_OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Default stored representations, used when the field does not configure
/// an input format.
const DATE_INPUT_FORMAT: &str = "%Y%m%d";
const TIME_INPUT_FORMAT: &str = "%H:%M:%S";
const DATE_TIME_INPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Applies the kind's coercion rules to a raw stored value.
///
/// Rules, in order: line-break conversion when configured, then the kind's
/// coercion class (date/time normalization, numeric cast, multi-value list
/// wrapping). An empty result coerces to `None`.
pub fn coerce_value(
    field: &Field,
    definition: &FieldKindDefinition,
    value: JsonValue,
) -> Option<JsonValue> {
    let value = match &field.line_breaks {
        Some(mode) => convert_line_breaks(value, *mode),
        None => value,
    };

    let coerced = match definition.coercion {
        CoercionClass::None | CoercionClass::RichText => Some(value),
        CoercionClass::Numeric => coerce_numeric(value),
        CoercionClass::Date => coerce_temporal(field, value, DATE_INPUT_FORMAT, |s, fmt| {
            NaiveDate::parse_from_str(s, fmt)
                .map(|d| d.format(DATE_OUTPUT_FORMAT).to_string())
        }),
        CoercionClass::Time => coerce_temporal(field, value, TIME_INPUT_FORMAT, |s, fmt| {
            NaiveTime::parse_from_str(s, fmt)
                .map(|t| t.format(TIME_OUTPUT_FORMAT).to_string())
        }),
        CoercionClass::DateTime => {
            coerce_temporal(field, value, DATE_TIME_INPUT_FORMAT, |s, fmt| {
                NaiveDateTime::parse_from_str(s, fmt)
                    .map(|dt| dt.format(DATE_TIME_OUTPUT_FORMAT).to_string())
            })
        }
        CoercionClass::MultiValue => return coerce_multi_value(value),
    };

    coerced.filter(|v| !is_empty_value(v))
}

/// Whether a coerced value should resolve to null.
///
/// Only null and the empty string count as empty; `false` and `0` are real
/// values (numeric kinds null out zero in their own cast rule).
pub fn is_empty_value(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::String(s) => s.is_empty(),
        _ => false,
    }
}

fn convert_line_breaks(value: JsonValue, mode: LineBreakMode) -> JsonValue {
    let Some(text) = value.as_str() else {
        return value;
    };
    let normalized = text.replace("\r\n", "\n");
    let converted = match mode {
        LineBreakMode::Breaks => normalized.replace('\n', "<br />\n"),
        LineBreakMode::Paragraphs => normalized
            .split("\n\n")
            .filter(|block| !block.trim().is_empty())
            .map(|block| format!("<p>{}</p>", block.trim().replace('\n', "<br />\n")))
            .collect::<Vec<_>>()
            .join("\n"),
    };
    JsonValue::String(converted)
}

fn coerce_numeric(value: JsonValue) -> Option<JsonValue> {
    let number = match &value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match number {
        Some(n) if n != 0.0 => serde_json::Number::from_f64(n).map(JsonValue::Number),
        _ => None,
    }
}

fn coerce_temporal(
    field: &Field,
    value: JsonValue,
    default_input_format: &str,
    reformat: impl Fn(&str, &str) -> Result<String, chrono::ParseError>,
) -> Option<JsonValue> {
    let stored = value.as_str()?;
    if stored.is_empty() {
        return None;
    }
    let input_format = field.input_format.as_deref().unwrap_or(default_input_format);
    match reformat(stored, input_format) {
        Ok(formatted) => Some(JsonValue::String(formatted)),
        Err(err) => {
            debug!(
                "field \"{}\" stored value {:?} does not match input format {:?}: {}",
                field.key, stored, input_format, err
            );
            None
        }
    }
}

/// Multi-value kinds always resolve to a list: a stored scalar is wrapped
/// into a single-element list, an existing list passes through unchanged,
/// and an empty non-list value normalizes to null.
fn coerce_multi_value(value: JsonValue) -> Option<JsonValue> {
    match value {
        JsonValue::Array(items) => Some(JsonValue::Array(items)),
        other if is_empty_value(&other) => None,
        other => Some(JsonValue::Array(vec![other])),
    }
}
