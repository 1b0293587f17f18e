//! Host type catalog: the set of known host types and the attributes
//! location rules are evaluated against.
//!
//! The catalog is supplied by the external data store at schema-build time.
//! Order is preserved so location resolution produces deterministic,
//! ordered results.

use std::collections::{BTreeSet, HashMap};

/// Location-relevant attributes of one host type: which (parameter, value)
/// pairs the host type accepts.
#[derive(Debug, Clone, Default)]
pub struct HostTypeAttributes {
    accepted: HashMap<String, BTreeSet<String>>,
}

impl HostTypeAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper declaring that this host type accepts the given
    /// parameter/value pair.
    pub fn accept(mut self, parameter: impl Into<String>, value: impl Into<String>) -> Self {
        self.accepted
            .entry(parameter.into())
            .or_default()
            .insert(value.into());
        self
    }

    /// Whether the host type accepts the given parameter/value pair.
    ///
    /// Unknown parameters are simply not accepted; they are never an error.
    pub fn accepts(&self, parameter: &str, value: &str) -> bool {
        self.accepted
            .get(parameter)
            .is_some_and(|values| values.contains(value))
    }

    /// Whether the host type knows the parameter at all.
    pub fn has_parameter(&self, parameter: &str) -> bool {
        self.accepted.contains_key(parameter)
    }
}

/// Ordered catalog of known host types.
#[derive(Debug, Clone, Default)]
pub struct HostTypeCatalog {
    order: Vec<String>,
    types: HashMap<String, HostTypeAttributes>,
}

impl HostTypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a host type with its attributes. Re-adding a name replaces its
    /// attributes but keeps its original position.
    pub fn add_host_type(&mut self, name: impl Into<String>, attributes: HostTypeAttributes) {
        let name = name.into();
        if !self.types.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.types.insert(name, attributes);
    }

    /// Builder-style variant of [`add_host_type`](Self::add_host_type).
    pub fn with_host_type(
        mut self,
        name: impl Into<String>,
        attributes: HostTypeAttributes,
    ) -> Self {
        self.add_host_type(name, attributes);
        self
    }

    pub fn attributes(&self, name: &str) -> Option<&HostTypeAttributes> {
        self.types.get(name)
    }

    /// Host type names in insertion order.
    pub fn host_type_names(&self) -> &[String] {
        &self.order
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HostTypeAttributes)> {
        self.order
            .iter()
            .filter_map(|name| self.types.get(name).map(|attrs| (name.as_str(), attrs)))
    }
}
