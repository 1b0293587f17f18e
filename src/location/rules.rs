//! Evaluation of location rule trees against the host type catalog.

use log::debug;

use crate::config::FieldGroup;
use crate::host::{HostTypeAttributes, HostTypeCatalog};

use super::LocationRule;

/// Computes the ordered, de-duplicated set of host type names a field group
/// attaches to.
///
/// An explicit host-type list always wins over rule evaluation, and an
/// explicit-but-empty list is a deliberate "attach nowhere" that is
/// respected as given. Groups without an explicit list (or with
/// `map_from_rules` set) have their OR-of-AND rule tree evaluated against
/// every host type in the catalog. Malformed or unknown conditions are
/// treated as non-matching, never as errors.
pub fn resolve_locations(group: &FieldGroup, catalog: &HostTypeCatalog) -> Vec<String> {
    if let Some(explicit) = &group.host_types {
        if !group.map_from_rules {
            return dedupe(explicit.iter().map(String::as_str));
        }
    }

    if group.location.is_empty() {
        debug!(
            "field group \"{}\" has no location rules; it will be synthesized but attach nowhere",
            group.key
        );
        return Vec::new();
    }

    let matched = catalog
        .iter()
        .filter(|(_, attrs)| matches_any_branch(&group.location, attrs))
        .map(|(name, _)| name);
    dedupe(matched)
}

fn matches_any_branch(rules: &[LocationRule], attrs: &HostTypeAttributes) -> bool {
    rules.iter().any(|branch| matches_branch(branch, attrs))
}

fn matches_branch(branch: &LocationRule, attrs: &HostTypeAttributes) -> bool {
    if branch.conditions.is_empty() {
        // An empty AND-group matches nothing, not everything.
        return false;
    }
    branch.conditions.iter().all(|cond| {
        use super::RuleOperator::*;
        match cond.operator {
            Equals => attrs.accepts(&cond.parameter, &cond.value),
            NotEquals => attrs.has_parameter(&cond.parameter) && !attrs.accepts(&cond.parameter, &cond.value),
        }
    })
}

fn dedupe<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    names
        .filter(|name| !name.is_empty() && seen.insert(name.to_string()))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::LocationCondition;

    fn catalog() -> HostTypeCatalog {
        HostTypeCatalog::new()
            .with_host_type(
                "Article",
                HostTypeAttributes::new()
                    .accept("host_type", "article")
                    .accept("template", "default"),
            )
            .with_host_type(
                "Page",
                HostTypeAttributes::new()
                    .accept("host_type", "page")
                    .accept("template", "default")
                    .accept("template", "landing"),
            )
            .with_host_type(
                "Author",
                HostTypeAttributes::new().accept("entity", "user"),
            )
    }

    fn group_with_rules(rules: Vec<LocationRule>) -> FieldGroup {
        let mut group = FieldGroup::new("group_loc", "Location Group");
        group.location = rules;
        group
    }

    #[test]
    fn test_explicit_list_wins_over_rules() {
        let mut group = group_with_rules(vec![LocationRule::new(vec![
            LocationCondition::equals("host_type", "article"),
        ])]);
        group.host_types = Some(vec!["Page".to_string(), "Page".to_string()]);
        assert_eq!(resolve_locations(&group, &catalog()), vec!["Page"]);
    }

    #[test]
    fn test_explicit_empty_list_detaches_everywhere() {
        let mut group = group_with_rules(vec![LocationRule::new(vec![
            LocationCondition::equals("host_type", "article"),
        ])]);
        group.host_types = Some(vec![]);
        assert!(resolve_locations(&group, &catalog()).is_empty());
    }

    #[test]
    fn test_or_branches_union_host_types() {
        let group = group_with_rules(vec![
            LocationRule::new(vec![LocationCondition::equals("host_type", "article")]),
            LocationRule::new(vec![LocationCondition::equals("host_type", "page")]),
        ]);
        assert_eq!(resolve_locations(&group, &catalog()), vec!["Article", "Page"]);
    }

    #[test]
    fn test_and_conditions_must_all_match() {
        let group = group_with_rules(vec![LocationRule::new(vec![
            LocationCondition::equals("host_type", "page"),
            LocationCondition::equals("template", "landing"),
        ])]);
        assert_eq!(resolve_locations(&group, &catalog()), vec!["Page"]);
    }

    #[test]
    fn test_not_equals_excludes_value() {
        let group = group_with_rules(vec![LocationRule::new(vec![
            LocationCondition::not_equals("host_type", "article"),
        ])]);
        // Author has no host_type parameter at all, so it is non-matching
        // rather than trivially matching the negation.
        assert_eq!(resolve_locations(&group, &catalog()), vec!["Page"]);
    }

    #[test]
    fn test_unknown_parameter_is_non_matching() {
        let group = group_with_rules(vec![LocationRule::new(vec![
            LocationCondition::equals("no_such_parameter", "whatever"),
        ])]);
        assert!(resolve_locations(&group, &catalog()).is_empty());
    }

    #[test]
    fn test_empty_rule_set_resolves_to_no_locations() {
        let group = group_with_rules(vec![]);
        assert!(resolve_locations(&group, &catalog()).is_empty());
    }

    #[test]
    fn test_empty_branch_matches_nothing() {
        let group = group_with_rules(vec![LocationRule::new(vec![])]);
        assert!(resolve_locations(&group, &catalog()).is_empty());
    }
}
