//! Loading field group configs from JSON documents.
//!
//! A config file holds either a single field group object or an array of
//! them (the "local JSON" export convention). Directory loading skips
//! unreadable or malformed files with a logged diagnostic rather than
//! failing the whole load, matching the registration pass's
//! unit-of-failure semantics.

use std::fs;
use std::path::Path;

use log::{info, warn};
use serde_json::Value as JsonValue;

use crate::error::{SchemaError, SchemaResult};

use super::FieldGroup;

/// Parses one JSON document into field groups. Accepts a single group
/// object or an array of groups.
pub fn parse_field_groups(json: &str) -> SchemaResult<Vec<FieldGroup>> {
    let value: JsonValue = serde_json::from_str(json)
        .map_err(|e| SchemaError::InvalidConfig(format!("invalid JSON: {e}")))?;

    match value {
        JsonValue::Array(_) => serde_json::from_value(value)
            .map_err(|e| SchemaError::InvalidConfig(format!("invalid field group list: {e}"))),
        JsonValue::Object(_) => {
            let group: FieldGroup = serde_json::from_value(value)
                .map_err(|e| SchemaError::InvalidConfig(format!("invalid field group: {e}")))?;
            Ok(vec![group])
        }
        other => Err(SchemaError::InvalidConfig(format!(
            "expected an object or array of field groups, got {other}"
        ))),
    }
}

/// Loads field groups from a single JSON file.
///
/// # Errors
/// Returns a `SchemaError` if the file cannot be read or does not parse as
/// field group config.
pub fn load_field_groups_from_file<P: AsRef<Path>>(path: P) -> SchemaResult<Vec<FieldGroup>> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| SchemaError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_field_groups(&json)
}

/// Loads every `.json` file in a directory as field group config.
///
/// Files that fail to read or parse are logged and skipped; the remaining
/// files still load.
///
/// # Errors
/// Returns a `SchemaError` only if the directory itself cannot be read.
pub fn load_field_groups_from_dir<P: AsRef<Path>>(dir: P) -> SchemaResult<Vec<FieldGroup>> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir).map_err(|source| SchemaError::Io {
        path: dir.display().to_string(),
        source,
    })?;

    let mut paths: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut groups = Vec::new();
    for path in paths {
        match load_field_groups_from_file(&path) {
            Ok(loaded) => groups.extend(loaded),
            Err(err) => {
                warn!(
                    "skipping field group config {}: {}",
                    path.display(),
                    err
                );
            }
        }
    }

    info!(
        "loaded {} field group(s) from {}",
        groups.len(),
        dir.display()
    );
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const GROUP_JSON: &str = r#"{
        "key": "group_hero",
        "title": "Hero",
        "fields": [
            {"key": "field_headline", "name": "headline", "kind": "text"}
        ]
    }"#;

    #[test]
    fn test_parse_single_group_object() {
        let groups = parse_field_groups(GROUP_JSON).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, "group_hero");
        assert_eq!(groups[0].fields.len(), 1);
    }

    #[test]
    fn test_parse_group_array() {
        let json = format!("[{GROUP_JSON}, {GROUP_JSON}]");
        let groups = parse_field_groups(&json).unwrap();
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_parse_rejects_scalars() {
        assert!(parse_field_groups("42").is_err());
        assert!(parse_field_groups("not json").is_err());
    }

    #[test]
    fn test_load_from_dir_skips_bad_files() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("hero.json"), GROUP_JSON)?;
        fs::write(dir.path().join("broken.json"), "{ not json")?;
        fs::write(dir.path().join("notes.txt"), "ignored")?;

        let groups = load_field_groups_from_dir(dir.path())?;
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, "group_hero");
        Ok(())
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let err = load_field_groups_from_file("/no/such/config.json").unwrap_err();
        assert!(matches!(err, SchemaError::Io { .. }));
    }
}
