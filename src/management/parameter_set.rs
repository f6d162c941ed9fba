use std::collections::{BTreeMap, BTreeSet};

use super::{Error, Result, UsageParameterSet};

/// The raw value a management layer holds for one usage parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterValue {
    /// A counter value.
    Counter(i64),
    /// The parameter exists but has no value yet.
    Unset,
    /// Anything that is not a counter, described by its type name.
    Other(String),
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        Self::Counter(value)
    }
}

impl From<serde_json::Value> for ParameterValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Unset,
            Value::Number(n) => match n.as_i64() {
                Some(v) => Self::Counter(v),
                None => Self::Other(format!("number {n}")),
            },
            Value::Bool(_) => Self::Other("bool".to_owned()),
            Value::String(_) => Self::Other("string".to_owned()),
            Value::Array(_) => Self::Other("array".to_owned()),
            Value::Object(_) => Self::Other("object".to_owned()),
        }
    }
}

/// A usage parameter set backed by a point-in-time copy of its values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticParameterSet {
    parameters: BTreeMap<String, ParameterValue>,
}

impl StaticParameterSet {
    pub fn new(parameters: BTreeMap<String, ParameterValue>) -> Self {
        Self { parameters }
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for StaticParameterSet
where
    K: Into<String>,
    V: Into<ParameterValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl UsageParameterSet for StaticParameterSet {
    fn parameter_names(&self) -> Result<BTreeSet<String>> {
        Ok(self.parameters.keys().cloned().collect())
    }

    fn parameter(&self, name: &str) -> Result<Option<i64>> {
        match self.parameters.get(name) {
            Some(ParameterValue::Counter(v)) => Ok(Some(*v)),
            Some(ParameterValue::Unset) => Ok(None),
            Some(ParameterValue::Other(found)) => Err(Error::WrongType {
                name: name.to_owned(),
                found: found.clone(),
            }),
            None => Err(Error::ParameterNotFound(name.to_owned())),
        }
    }
}

/// A usage parameter set that exposes neither of the introspection capabilities.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpaqueParameterSet;

impl UsageParameterSet for OpaqueParameterSet {}
