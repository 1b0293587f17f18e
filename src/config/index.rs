//! Pre-resolved lookup index over a set of field group configs.
//!
//! Clone fields reference other groups and fields by key. Instead of
//! chasing those keys against a live config store during registration, the
//! whole reference graph is indexed once up front, so clone resolution is a
//! structural lookup and recursion terminates by construction.

use std::collections::BTreeMap;

use super::{Field, FieldGroup};

/// Key-based index of every group and field in a registration pass,
/// including fields nested inside sub-groups and flex layouts.
#[derive(Debug, Clone, Default)]
pub struct ConfigIndex {
    groups: BTreeMap<String, FieldGroup>,
    /// field key -> (owning group key, field)
    fields: BTreeMap<String, (String, Field)>,
}

impl ConfigIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index over the given groups.
    pub fn build(groups: &[FieldGroup]) -> Self {
        let mut index = Self::new();
        index.extend(groups);
        index
    }

    /// Adds more groups to the index. Existing keys are kept; configs are
    /// immutable within a pass, so the first definition wins.
    pub fn extend(&mut self, groups: &[FieldGroup]) {
        for group in groups {
            if !self.groups.contains_key(&group.key) {
                self.groups.insert(group.key.clone(), group.clone());
            }
            for field in &group.fields {
                self.index_field(&group.key, field);
            }
        }
    }

    fn index_field(&mut self, group_key: &str, field: &Field) {
        if !self.fields.contains_key(&field.key) {
            self.fields
                .insert(field.key.clone(), (group_key.to_string(), field.clone()));
        }
        for sub_field in &field.sub_fields {
            self.index_field(group_key, sub_field);
        }
        for layout in &field.layouts {
            for sub_field in &layout.sub_fields {
                self.index_field(group_key, sub_field);
            }
        }
    }

    pub fn group(&self, key: &str) -> Option<&FieldGroup> {
        self.groups.get(key)
    }

    pub fn field(&self, key: &str) -> Option<&Field> {
        self.fields.get(key).map(|(_, field)| field)
    }

    /// The group a field belongs to.
    pub fn group_of_field(&self, field_key: &str) -> Option<&FieldGroup> {
        let (group_key, _) = self.fields.get(field_key)?;
        self.groups.get(group_key)
    }

    pub fn group_keys(&self) -> Vec<&str> {
        self.groups.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FieldKind, FlexLayout};

    #[test]
    fn test_nested_fields_are_indexed() {
        let mut repeater = Field::new("field_rows", "rows", FieldKind::Repeater);
        repeater
            .sub_fields
            .push(Field::new("field_cell", "cell", FieldKind::Text));

        let mut flex = Field::new("field_flex", "blocks", FieldKind::FlexibleContent);
        flex.layouts.push(FlexLayout {
            key: "layout_hero".to_string(),
            name: "hero".to_string(),
            display_name: None,
            sub_fields: vec![Field::new("field_headline", "headline", FieldKind::Text)],
        });

        let mut group = FieldGroup::new("group_a", "A");
        group.fields = vec![repeater, flex];

        let index = ConfigIndex::build(&[group]);
        assert!(index.field("field_cell").is_some());
        assert!(index.field("field_headline").is_some());
        assert_eq!(index.group_of_field("field_cell").unwrap().key, "group_a");
    }

    #[test]
    fn test_first_definition_wins() {
        let mut group_a = FieldGroup::new("group_a", "A");
        group_a.fields = vec![Field::new("field_shared", "first", FieldKind::Text)];
        let mut group_b = FieldGroup::new("group_b", "B");
        group_b.fields = vec![Field::new("field_shared", "second", FieldKind::Number)];

        let index = ConfigIndex::build(&[group_a, group_b]);
        assert_eq!(index.field("field_shared").unwrap().name, "first");
    }
}
