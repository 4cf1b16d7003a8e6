//! Persisted shader selection: a name plus raw parameter values.
//!
//! Computed angles are never stored; loading a state and calling
//! [`ShaderState::compute`] reproduces them.

use serde::{Deserialize, Serialize};

use crate::errors::LookupError;
use crate::param::{BoundParams, ParamValue, ParamValues};
use crate::pipeline::{AngleResult, PipelineOptions, compute_angles_with};
use crate::shader::Registry;
use crate::types::Point;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShaderState {
    pub shader: String,
    #[serde(default)]
    pub params: ParamValues,
    #[serde(default)]
    pub globals: ParamValues,
}

impl ShaderState {
    pub fn new(shader: impl Into<String>) -> Self {
        Self {
            shader: shader.into(),
            params: ParamValues::new(),
            globals: ParamValues::new(),
        }
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.set(name, value);
        self
    }

    pub fn global(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.globals.set(name, value);
        self
    }

    /// Replay the state over `points`
    pub fn compute(
        &self,
        registry: &Registry,
        points: &[Point],
    ) -> Result<Vec<AngleResult>, LookupError> {
        self.compute_with(registry, points, &PipelineOptions::default())
    }

    pub fn compute_with(
        &self,
        registry: &Registry,
        points: &[Point],
        options: &PipelineOptions,
    ) -> Result<Vec<AngleResult>, LookupError> {
        compute_angles_with(
            registry,
            points,
            &self.shader,
            &self.params,
            &self.globals,
            options,
        )
    }

    /// The same state with every declared parameter filled in.
    ///
    /// Invalid values are replaced by defaults and undeclared keys dropped, so
    /// the result is what the pipeline actually used.
    pub fn resolved(&self, registry: &Registry) -> Result<Self, LookupError> {
        let entry = registry.lookup(&self.shader)?;
        let params = BoundParams::resolve(entry.name(), entry.params(), &self.params);
        let globals = BoundParams::resolve("globals", registry.globals(), &self.globals);
        Ok(Self {
            shader: self.shader.clone(),
            params: params.to_values(),
            globals: globals.to_values(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::GlobalParams;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn resolved_fills_defaults_and_drops_junk() {
        let registry = Registry::builtin().unwrap();
        let state = ShaderState::new("radial_wave")
            .param("frequency", 3.0)
            .param("amplitude", -100.0)
            .param("bogus", 1.0)
            .global("counter_rotate", true);
        let resolved = state.resolved(&registry).unwrap();

        assert_eq!(resolved.params.get("frequency"), Some(&ParamValue::Number(3.0)));
        assert_eq!(resolved.params.get("amplitude"), Some(&ParamValue::Number(0.5)));
        assert!(resolved.params.get("bogus").is_none());
        assert_eq!(resolved.globals.get("counter_rotate"), Some(&ParamValue::Boolean(true)));
        assert_eq!(resolved.globals.len(), GlobalParams::params().len());
    }

    #[test]
    fn compute_replays_selection() {
        let registry = Registry::builtin().unwrap();
        let points = vec![Point::new("A", 0.0, 0.0), Point::new("B", 5.0, 5.0)];
        let out = ShaderState::new("fixed")
            .param("angle", FRAC_PI_2)
            .compute(&registry, &points)
            .unwrap();
        assert!(out.iter().all(|r| r.angle_degrees == 90.0));
    }

    #[test]
    fn unknown_shader_is_a_lookup_error() {
        let registry = Registry::builtin().unwrap();
        let err = ShaderState::new("nope").resolved(&registry).unwrap_err();
        assert!(matches!(err, LookupError::UnknownShader { .. }));
    }
}
