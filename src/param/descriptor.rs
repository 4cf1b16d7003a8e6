//! Parameter descriptors and their builder.

use crate::errors::ParamError;

use super::{ParamType, ParamValue};

/// One named, typed, bounded input to a shader or to the pipeline.
///
/// Only [`ParamBuilder::build`] creates descriptors, so every descriptor has
/// a valid identifier and a default that passes its own validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDescriptor {
    name: String,
    ty: ParamType,
    default: ParamValue,
    description: Option<String>,
    min: Option<f64>,
    max: Option<f64>,
    step: Option<f64>,
}

impl ParamDescriptor {
    pub fn builder(name: impl Into<String>, ty: ParamType) -> ParamBuilder {
        ParamBuilder {
            name: name.into(),
            ty,
            default: None,
            description: None,
            min: None,
            max: None,
            step: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> ParamType {
        self.ty
    }

    pub fn default_value(&self) -> ParamValue {
        self.default
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn min(&self) -> Option<f64> {
        self.min
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }

    pub fn step(&self) -> Option<f64> {
        self.step
    }

    /// Type predicate, then the declared numeric bounds.
    pub fn validate(&self, value: &ParamValue) -> bool {
        self.ty.validate(value) && self.within_bounds(value)
    }

    fn within_bounds(&self, value: &ParamValue) -> bool {
        let Some(v) = value.as_number() else {
            return true;
        };
        self.min.is_none_or(|min| v >= min) && self.max.is_none_or(|max| v <= max)
    }
}

/// Builder for [`ParamDescriptor`]; checks everything at `build()`.
#[derive(Debug, Clone)]
pub struct ParamBuilder {
    name: String,
    ty: ParamType,
    default: Option<ParamValue>,
    description: Option<String>,
    min: Option<f64>,
    max: Option<f64>,
    step: Option<f64>,
}

impl ParamBuilder {
    pub fn default(mut self, value: impl Into<ParamValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn range(self, min: f64, max: f64) -> Self {
        self.min(min).max(max)
    }

    pub fn step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn build(self) -> Result<ParamDescriptor, ParamError> {
        if !is_identifier(&self.name) {
            return Err(ParamError::InvalidName { name: self.name });
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(ParamError::InvertedBounds {
                    name: self.name,
                    min,
                    max,
                });
            }
        }

        let default = self.default.unwrap_or_else(|| self.ty.zero());
        let descriptor = ParamDescriptor {
            name: self.name,
            ty: self.ty,
            default,
            description: self.description,
            min: self.min,
            max: self.max,
            step: self.step,
        };

        if !descriptor.ty.validate(&default) {
            return Err(ParamError::InvalidDefault {
                name: descriptor.name,
                ty: descriptor.ty,
            });
        }
        if !descriptor.within_bounds(&default) {
            return Err(ParamError::DefaultOutOfBounds {
                name: descriptor.name,
                min: descriptor.min,
                max: descriptor.max,
            });
        }
        Ok(descriptor)
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub fn number(name: &str, default: f64) -> ParamBuilder {
    ParamDescriptor::builder(name, ParamType::Number).default(default)
}

pub fn integer(name: &str, default: i64) -> ParamBuilder {
    ParamDescriptor::builder(name, ParamType::Integer).default(default)
}

pub fn percent(name: &str, default: f64) -> ParamBuilder {
    ParamDescriptor::builder(name, ParamType::Percent).default(default)
}

pub fn angle(name: &str, default: f64) -> ParamBuilder {
    ParamDescriptor::builder(name, ParamType::Angle).default(default)
}

pub fn boolean(name: &str, default: bool) -> ParamBuilder {
    ParamDescriptor::builder(name, ParamType::Boolean).default(default)
}

pub fn coordinate(name: &str) -> ParamBuilder {
    ParamDescriptor::builder(name, ParamType::Coordinate)
}
