//! Location rules: which host types a field group attaches to.

mod rules;

pub use rules::resolve_locations;

use serde::{Deserialize, Serialize};

/// Comparison operator of one location condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleOperator {
    #[serde(rename = "==")]
    Equals,
    #[serde(rename = "!=")]
    NotEquals,
}

/// One (parameter, operator, value) condition, e.g. `host_type == article`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationCondition {
    pub parameter: String,
    pub operator: RuleOperator,
    pub value: String,
}

impl LocationCondition {
    pub fn equals(parameter: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            parameter: parameter.into(),
            operator: RuleOperator::Equals,
            value: value.into(),
        }
    }

    pub fn not_equals(parameter: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            parameter: parameter.into(),
            operator: RuleOperator::NotEquals,
            value: value.into(),
        }
    }
}

/// One OR-branch of AND-ed conditions.
///
/// A host type matches the branch when every condition is satisfied by its
/// attributes; it matches the group's rule tree when any branch matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationRule {
    pub conditions: Vec<LocationCondition>,
}

impl LocationRule {
    pub fn new(conditions: Vec<LocationCondition>) -> Self {
        Self { conditions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_serde_shape() {
        // The config format nests rules as an array of condition arrays.
        let json = r#"[
            [{"parameter":"host_type","operator":"==","value":"article"}],
            [{"parameter":"template","operator":"!=","value":"landing"}]
        ]"#;
        let rules: Vec<LocationRule> = serde_json::from_str(json).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].conditions[0].operator, RuleOperator::Equals);
        assert_eq!(rules[1].conditions[0].operator, RuleOperator::NotEquals);
    }
}
