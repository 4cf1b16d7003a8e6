//! The shader registry: name → parameter schema + binding.
//!
//! Built once at startup and read-only afterwards. Registration is
//! fail-fast: a duplicate name or a malformed parameter aborts it.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use crate::errors::{LookupError, RegistryError};
use crate::log::debug;
use crate::param::{BoundParams, ParamBuilder, ParamDescriptor, ParamValues};
use crate::pipeline::GlobalParams;

use super::{Catalog, Custom, Shader, ShaderArgs, ShaderFn};
use super::{discrete, field, noise, radial, zones};

type Binder = Arc<dyn Fn(&BoundParams) -> Shader + Send + Sync>;

/// A registered shader: its schema and how to bind it
#[derive(Clone)]
pub struct ShaderEntry {
    name: String,
    description: Option<String>,
    params: Vec<ParamDescriptor>,
    binder: Binder,
}

impl ShaderEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn params(&self) -> &[ParamDescriptor] {
        &self.params
    }

    /// Resolve `values` (falling back to defaults) and bind the shader
    pub fn bind(&self, values: &ParamValues) -> Shader {
        let bound = BoundParams::resolve(&self.name, &self.params, values);
        (self.binder)(&bound)
    }

    /// The shader with every parameter at its default
    pub fn with_defaults(&self) -> Shader {
        self.bind(&ParamValues::new())
    }
}

impl fmt::Debug for ShaderEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderEntry")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Name-keyed catalog of shaders, plus the global parameter schema
#[derive(Debug, Clone)]
pub struct Registry {
    entries: Vec<ShaderEntry>,
    index: HashMap<String, usize>,
    globals: Vec<ParamDescriptor>,
}

impl Registry {
    /// A registry with no shaders
    pub fn new() -> Result<Self, RegistryError> {
        let globals = GlobalParams::descriptors().map_err(RegistryError::InvalidGlobal)?;
        Ok(Self {
            entries: Vec::new(),
            index: HashMap::new(),
            globals,
        })
    }

    /// A registry holding the full built-in catalog
    pub fn builtin() -> Result<Self, RegistryError> {
        let mut registry = Self::new()?;
        radial::register_all(&mut registry)?;
        field::register_all(&mut registry)?;
        zones::register_all(&mut registry)?;
        noise::register_all(&mut registry)?;
        discrete::register_all(&mut registry)?;
        debug!(count = registry.len(), "built-in shader catalog ready");
        Ok(registry)
    }

    /// Register a built-in shader type
    pub fn register<S: Catalog>(&mut self) -> Result<(), RegistryError> {
        let binder: Binder = Arc::new(|params: &BoundParams| -> Shader { S::bind(params).into() });
        self.insert(
            S::NAME,
            S::DESCRIPTION.map(str::to_string),
            S::params(),
            binder,
        )
    }

    /// Register a closure as a shader
    pub fn register_fn<F>(
        &mut self,
        name: &str,
        description: Option<&str>,
        params: Vec<ParamBuilder>,
        f: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn(&ShaderArgs<'_>, &BoundParams) -> f64 + Send + Sync + 'static,
    {
        let shared_name: Arc<str> = Arc::from(name);
        let f: Arc<ShaderFn> = Arc::new(f);
        let binder: Binder = Arc::new(move |params: &BoundParams| -> Shader {
            Custom::new(shared_name.clone(), f.clone(), params.clone()).into()
        });
        self.insert(name, description.map(str::to_string), params, binder)
    }

    fn insert(
        &mut self,
        name: &str,
        description: Option<String>,
        params: Vec<ParamBuilder>,
        binder: Binder,
    ) -> Result<(), RegistryError> {
        if name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.index.contains_key(name) {
            return Err(RegistryError::DuplicateShader {
                name: name.to_string(),
            });
        }

        let mut seen = HashSet::new();
        let mut descriptors = Vec::with_capacity(params.len());
        for builder in params {
            if !seen.insert(builder.name().to_string()) {
                return Err(RegistryError::DuplicateParam {
                    shader: name.to_string(),
                    param: builder.name().to_string(),
                });
            }
            let descriptor = builder.build().map_err(|source| RegistryError::InvalidParam {
                shader: name.to_string(),
                source,
            })?;
            descriptors.push(descriptor);
        }

        debug!(shader = name, params = descriptors.len(), "registered shader");
        self.index.insert(name.to_string(), self.entries.len());
        self.entries.push(ShaderEntry {
            name: name.to_string(),
            description,
            params: descriptors,
            binder,
        });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ShaderEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// Like [`Registry::get`], with a "did you mean" hint on failure
    pub fn lookup(&self, name: &str) -> Result<&ShaderEntry, LookupError> {
        self.get(name).ok_or_else(|| LookupError::UnknownShader {
            name: name.to_string(),
            suggestion: self.suggest(name).map(|s| format!("did you mean `{s}`?")),
        })
    }

    fn suggest(&self, name: &str) -> Option<&str> {
        let limit = (name.len() / 3).max(2);
        self.entries
            .iter()
            .map(|e| (levenshtein::levenshtein(name, &e.name), e.name.as_str()))
            .filter(|(d, _)| *d <= limit)
            .min_by_key(|(d, _)| *d)
            .map(|(_, n)| n)
    }

    /// Names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Names sorted alphabetically, for selectors
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.names().collect();
        names.sort_unstable();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShaderEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Descriptors of the shader-independent global parameters
    pub fn globals(&self) -> &[ParamDescriptor] {
        &self.globals
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ParamError;
    use crate::param::{number, percent};
    use crate::shader::testing::args_at;
    use crate::shader::{Evaluate, Fixed, Radial};

    #[test]
    fn builtin_catalog_is_complete() {
        let registry = Registry::builtin().unwrap();
        assert_eq!(registry.len(), 42);
        for name in ["radial", "fixed", "quantum_spin", "ripple", "crystal_structure", "random"] {
            assert!(registry.get(name).is_some(), "missing {name}");
        }
    }

    #[test]
    fn global_schema_is_built_with_the_registry() {
        let registry = Registry::new().unwrap();
        assert!(registry.is_empty());
        let names: Vec<_> = registry.globals().iter().map(|d| d.name()).collect();
        assert_eq!(
            names,
            ["custom_centroid", "fixed_offset", "counter_rotate", "radial_offset", "quantize"]
        );
        assert_eq!(Registry::builtin().unwrap().globals(), registry.globals());
    }

    #[test]
    fn every_default_is_valid() {
        let registry = Registry::builtin().unwrap();
        for entry in registry.iter() {
            for param in entry.params() {
                assert!(
                    param.validate(&param.default_value()),
                    "{}.{} default fails validation",
                    entry.name(),
                    param.name()
                );
            }
        }
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut registry = Registry::new().unwrap();
        registry.register::<Radial>().unwrap();
        let err = registry.register::<Radial>().unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateShader {
                name: "radial".into()
            }
        );

        let err = registry
            .register_fn("radial", None, vec![], |args, _| args.radial_angle)
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateShader { .. }));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicate_param_names_fail() {
        let mut registry = Registry::new().unwrap();
        let err = registry
            .register_fn(
                "twice",
                None,
                vec![number("k", 1.0), percent("k", 0.5)],
                |_, _| 0.0,
            )
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateParam {
                shader: "twice".into(),
                param: "k".into()
            }
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn bad_param_aborts_registration() {
        let mut registry = Registry::new().unwrap();
        let err = registry
            .register_fn("bad", None, vec![number("no good", 1.0)], |_, _| 0.0)
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::InvalidParam {
                shader: "bad".into(),
                source: ParamError::InvalidName {
                    name: "no good".into()
                }
            }
        );
        assert!(registry.get("bad").is_none());
    }

    #[test]
    fn empty_name_rejected() {
        let mut registry = Registry::new().unwrap();
        let err = registry.register_fn("", None, vec![], |_, _| 0.0).unwrap_err();
        assert_eq!(err, RegistryError::EmptyName);
    }

    #[test]
    fn closures_bind_their_params() {
        let mut registry = Registry::new().unwrap();
        registry
            .register_fn(
                "scaled",
                Some("radial angle times k"),
                vec![number("k", 2.0)],
                |args, params| args.radial_angle * params.number("k"),
            )
            .unwrap();
        let entry = registry.get("scaled").unwrap();
        assert_eq!(entry.description(), Some("radial angle times k"));

        let shader = entry.bind(&ParamValues::new().with("k", 3.0));
        let args = args_at(0.0, 1.0);
        assert!((shader.evaluate(&args) - 1.5 * std::f64::consts::PI).abs() < 1e-12);
        assert!(matches!(shader, Shader::Custom(_)));
    }

    #[test]
    fn lookup_suggests_close_names() {
        let mut registry = Registry::new().unwrap();
        registry.register::<Radial>().unwrap();
        registry.register::<Fixed>().unwrap();
        match registry.lookup("fixd").unwrap_err() {
            LookupError::UnknownShader { name, suggestion } => {
                assert_eq!(name, "fixd");
                assert_eq!(suggestion.as_deref(), Some("did you mean `fixed`?"));
            }
            other => panic!("unexpected {other:?}"),
        }
        match registry.lookup("completely_unrelated").unwrap_err() {
            LookupError::UnknownShader { suggestion, .. } => assert!(suggestion.is_none()),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn listing_orders() {
        let mut registry = Registry::new().unwrap();
        registry.register::<Radial>().unwrap();
        registry.register::<Fixed>().unwrap();
        assert_eq!(registry.names().collect::<Vec<_>>(), ["radial", "fixed"]);
        assert_eq!(registry.sorted_names(), ["fixed", "radial"]);
    }
}
