//! Variable, ordered variable sequences and resolved variable maps.
//!
//! Responsibilities:
//! - Represent a single parsed definition (`Variable`).
//! - Keep definitions in source order, duplicates included (`Variables`).
//! - Hold the resolved name/value lookup (`VariableMap`) and render it as a
//!   process environment.
//!
//! Invariants:
//! - `Variable` values are raw: they may still contain reference tokens and
//!   one layer of surrounding double quotes.
//! - A `VariableMap` built by the store only holds expanded values.
//! - The process-environment view strips one layer of surrounding quotes,
//!   the same rule the expander applies when substituting a value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::grammar::strip_quotes;

/// A single `NAME=VALUE` definition as it appeared in a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    name: String,
    value: String,
}

impl Variable {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw value, exactly as written after `=`.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The raw value without one layer of surrounding double quotes.
    pub fn unquoted_value(&self) -> &str {
        strip_quotes(&self.value)
    }

    pub fn into_parts(self) -> (String, String) {
        (self.name, self.value)
    }
}

/// Definitions in order of appearance. Duplicate names are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variables(Vec<Variable>);

impl Variables {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, variable: Variable) {
        self.0.push(variable);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Variable> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Variable] {
        &self.0
    }

    /// Collect into a map with last-write-wins and no expansion.
    pub fn to_map(&self) -> VariableMap {
        self.iter()
            .map(|v| (v.name.clone(), v.value.clone()))
            .collect()
    }
}

impl From<Vec<Variable>> for Variables {
    fn from(vars: Vec<Variable>) -> Self {
        Self(vars)
    }
}

impl FromIterator<Variable> for Variables {
    fn from_iter<I: IntoIterator<Item = Variable>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Variables {
    type Item = Variable;
    type IntoIter = std::vec::IntoIter<Variable>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Variables {
    type Item = &'a Variable;
    type IntoIter = std::slice::Iter<'a, Variable>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Resolved lookup from unique names to values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableMap(BTreeMap<String, String>);

impl VariableMap {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Set `name` to `value`, returning the value it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.0.iter()
    }

    /// Entries as variables, ordered by name.
    pub fn to_variables(&self) -> Variables {
        self.iter()
            .map(|(name, value)| Variable::new(name.clone(), value.clone()))
            .collect()
    }

    /// Name/value pairs ready to hand to a child process.
    pub fn to_process_env(&self) -> Vec<(String, String)> {
        self.iter()
            .map(|(name, value)| (name.clone(), strip_quotes(value).to_string()))
            .collect()
    }

    /// `KEY=VALUE` strings of the process-environment view.
    pub fn env_entries(&self) -> Vec<String> {
        self.to_process_env()
            .into_iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VariableMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a VariableMap {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
