//! Binding untyped parameter bags against descriptor lists.

use std::collections::BTreeMap;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::log::{debug, warn};

use super::{ParamDescriptor, ParamValue};

/// Untyped name → value bag, as it arrives from UI state or a saved file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamValues(BTreeMap<String, ParamValue>);

impl ParamValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ParamValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Fully resolved values: one valid entry per declared parameter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundParams {
    values: BTreeMap<String, ParamValue>,
}

impl BoundParams {
    /// Resolve `values` against `params`.
    ///
    /// A supplied value that fails its descriptor's validation, or is missing,
    /// is replaced by the default. Names no descriptor declares are dropped.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn resolve(owner: &str, params: &[ParamDescriptor], values: &ParamValues) -> Self {
        let mut bound = BTreeMap::new();
        for param in params {
            let value = match values.get(param.name()) {
                Some(v) if param.validate(v) => *v,
                Some(v) => {
                    warn!(
                        owner,
                        param = param.name(),
                        value = %v,
                        "invalid parameter value, using default"
                    );
                    param.default_value()
                }
                None => param.default_value(),
            };
            bound.insert(param.name().to_string(), value);
        }
        for (name, _) in values.iter() {
            if !bound.contains_key(name) {
                debug!(owner, param = name, "ignoring undeclared parameter");
            }
        }
        Self { values: bound }
    }

    /// Explicitly declared defaults only
    pub fn defaults(params: &[ParamDescriptor]) -> Self {
        Self::resolve("", params, &ParamValues::new())
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Numeric value of `name`, 0 when undeclared
    pub fn number(&self, name: &str) -> f64 {
        self.get(name).and_then(ParamValue::as_number).unwrap_or(0.0)
    }

    /// Integer value of `name`
    pub fn integer(&self, name: &str) -> i64 {
        self.number(name) as i64
    }

    pub fn flag(&self, name: &str) -> bool {
        self.get(name).and_then(ParamValue::as_bool).unwrap_or(false)
    }

    pub fn coord(&self, name: &str) -> DVec2 {
        self.get(name)
            .and_then(ParamValue::as_coord)
            .unwrap_or(DVec2::ZERO)
    }

    /// Whether `name` was declared and resolved
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Back to an untyped bag, e.g. for persisting the effective values
    pub fn to_values(&self) -> ParamValues {
        self.values.iter().map(|(k, v)| (k.clone(), *v)).collect()
    }
}
