//! Shader parameter system: value domains, descriptors and binding.
//!
//! A parameter is declared once with a [`ParamDescriptor`] and supplied per
//! call as an untyped [`ParamValue`]. Binding never fails: a value that does
//! not validate is replaced by the descriptor's default.

mod bind;
mod descriptor;

pub use bind::{BoundParams, ParamValues};
pub use descriptor::{
    ParamBuilder, ParamDescriptor, angle, boolean, coordinate, integer, number, percent,
};

use std::f64::consts::TAU;
use std::fmt;

use glam::{DVec2, dvec2};
use serde::{Deserialize, Serialize};

/// The closed set of value domains a parameter can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// Any finite number
    Number,
    /// A finite number with no fractional part
    Integer,
    /// A number in [0, 1]
    Percent,
    /// Radians in [0, 2π]
    Angle,
    Boolean,
    /// A point in normalized [-1, 1] space
    Coordinate,
}

/// Primitive shape of a value, checked before any range predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Number,
    Boolean,
    Object,
}

impl ParamType {
    pub const ALL: [ParamType; 6] = [
        ParamType::Number,
        ParamType::Integer,
        ParamType::Percent,
        ParamType::Angle,
        ParamType::Boolean,
        ParamType::Coordinate,
    ];

    /// Value used when a descriptor declares no default
    pub fn zero(self) -> ParamValue {
        match self {
            ParamType::Boolean => ParamValue::Boolean(false),
            ParamType::Coordinate => ParamValue::Coordinate(Coord::default()),
            _ => ParamValue::Number(0.0),
        }
    }

    pub fn kind(self) -> ValueKind {
        match self {
            ParamType::Boolean => ValueKind::Boolean,
            ParamType::Coordinate => ValueKind::Object,
            _ => ValueKind::Number,
        }
    }

    /// Whether `value` belongs to this domain.
    pub fn validate(self, value: &ParamValue) -> bool {
        if value.kind() != self.kind() {
            return false;
        }
        match (self, value) {
            (ParamType::Number, ParamValue::Number(v)) => v.is_finite(),
            (ParamType::Integer, ParamValue::Number(v)) => v.is_finite() && v.fract() == 0.0,
            (ParamType::Percent, ParamValue::Number(v)) => (0.0..=1.0).contains(v),
            (ParamType::Angle, ParamValue::Number(v)) => (0.0..=TAU).contains(v),
            (ParamType::Boolean, ParamValue::Boolean(_)) => true,
            (ParamType::Coordinate, ParamValue::Coordinate(c)) => {
                [c.x, c.y].iter().all(|v| (-1.0..=1.0).contains(v))
            }
            _ => false,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParamType::Number => "NUMBER",
            ParamType::Integer => "INTEGER",
            ParamType::Percent => "PERCENT",
            ParamType::Angle => "ANGLE",
            ParamType::Boolean => "BOOLEAN",
            ParamType::Coordinate => "COORDINATE",
        };
        f.write_str(name)
    }
}

/// A coordinate parameter value with named fields
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl From<Coord> for DVec2 {
    fn from(c: Coord) -> Self {
        dvec2(c.x, c.y)
    }
}

impl From<DVec2> for Coord {
    fn from(v: DVec2) -> Self {
        Coord { x: v.x, y: v.y }
    }
}

/// An untyped parameter value as it arrives from configuration or UI state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Boolean(bool),
    Number(f64),
    Coordinate(Coord),
}

impl ParamValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            ParamValue::Number(_) => ValueKind::Number,
            ParamValue::Boolean(_) => ValueKind::Boolean,
            ParamValue::Coordinate(_) => ValueKind::Object,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_coord(&self) -> Option<DVec2> {
        match self {
            ParamValue::Coordinate(c) => Some((*c).into()),
            _ => None,
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Number(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Number(v as f64)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Boolean(v)
    }
}

impl From<DVec2> for ParamValue {
    fn from(v: DVec2) -> Self {
        ParamValue::Coordinate(v.into())
    }
}

impl From<Coord> for ParamValue {
    fn from(c: Coord) -> Self {
        ParamValue::Coordinate(c)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Number(v) => write!(f, "{v}"),
            ParamValue::Boolean(b) => write!(f, "{b}"),
            ParamValue::Coordinate(c) => write!(f, "({}, {})", c.x, c.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn zero_values_validate() {
        for ty in ParamType::ALL {
            assert!(ty.validate(&ty.zero()), "{ty} zero value rejected");
        }
    }

    #[test]
    fn wrong_kind_is_rejected_first() {
        assert!(!ParamType::Number.validate(&ParamValue::Boolean(true)));
        assert!(!ParamType::Boolean.validate(&ParamValue::Number(1.0)));
        assert!(!ParamType::Coordinate.validate(&ParamValue::Number(0.0)));
        assert!(!ParamType::Angle.validate(&ParamValue::Coordinate(Coord::default())));
    }

    #[test]
    fn number_must_be_finite() {
        assert!(ParamType::Number.validate(&(-1e9).into()));
        assert!(!ParamType::Number.validate(&f64::NAN.into()));
        assert!(!ParamType::Number.validate(&f64::INFINITY.into()));
    }

    #[test]
    fn integer_rejects_fractions() {
        assert!(ParamType::Integer.validate(&6.0.into()));
        assert!(ParamType::Integer.validate(&(-3.0).into()));
        assert!(!ParamType::Integer.validate(&6.5.into()));
    }

    #[test]
    fn percent_and_angle_are_closed_intervals() {
        assert!(ParamType::Percent.validate(&0.0.into()));
        assert!(ParamType::Percent.validate(&1.0.into()));
        assert!(!ParamType::Percent.validate(&1.01.into()));
        assert!(ParamType::Angle.validate(&(2.0 * PI).into()));
        assert!(!ParamType::Angle.validate(&(-0.1).into()));
        assert!(!ParamType::Angle.validate(&7.0.into()));
    }

    #[test]
    fn coordinate_stays_in_unit_square() {
        assert!(ParamType::Coordinate.validate(&dvec2(-1.0, 1.0).into()));
        assert!(!ParamType::Coordinate.validate(&dvec2(1.5, 0.0).into()));
        assert!(!ParamType::Coordinate.validate(&dvec2(f64::NAN, 0.0).into()));
    }
}
