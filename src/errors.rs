//! Error types with rich diagnostics using miette
//!
//! Construction errors abort catalog setup, lookup errors surface caller bugs,
//! and ingestion errors carry source spans so a bad line renders with context.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::param::ParamType;

// ============================================================================
// Parameter Errors
// ============================================================================

/// Errors raised while building a parameter descriptor
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ParamError {
    #[error("invalid parameter name {name:?}")]
    #[diagnostic(
        code(ledspin::param::invalid_name),
        help("names must match [A-Za-z_][A-Za-z0-9_]*")
    )]
    InvalidName { name: String },

    #[error("default for parameter `{name}` is not a valid {ty}")]
    #[diagnostic(code(ledspin::param::invalid_default))]
    InvalidDefault { name: String, ty: ParamType },

    #[error("default for parameter `{name}` lies outside [{min:?}, {max:?}]")]
    #[diagnostic(code(ledspin::param::default_out_of_bounds))]
    DefaultOutOfBounds {
        name: String,
        min: Option<f64>,
        max: Option<f64>,
    },

    #[error("parameter `{name}` has min {min} greater than max {max}")]
    #[diagnostic(code(ledspin::param::inverted_bounds))]
    InvertedBounds { name: String, min: f64, max: f64 },
}

// ============================================================================
// Registry Errors
// ============================================================================

/// Errors raised while registering a shader
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("shader name must not be empty")]
    #[diagnostic(code(ledspin::registry::empty_name))]
    EmptyName,

    #[error("shader `{name}` is already registered")]
    #[diagnostic(
        code(ledspin::registry::duplicate_shader),
        help("shader names are unique; rename one of the registrations")
    )]
    DuplicateShader { name: String },

    #[error("shader `{shader}` declares parameter `{param}` more than once")]
    #[diagnostic(code(ledspin::registry::duplicate_param))]
    DuplicateParam { shader: String, param: String },

    #[error("invalid global parameter declaration")]
    #[diagnostic(code(ledspin::registry::invalid_global))]
    InvalidGlobal(
        #[source]
        #[diagnostic_source]
        ParamError,
    ),

    #[error("shader `{shader}` has an invalid parameter")]
    #[diagnostic(code(ledspin::registry::invalid_param))]
    InvalidParam {
        shader: String,
        #[source]
        #[diagnostic_source]
        source: ParamError,
    },
}

// ============================================================================
// Lookup Errors
// ============================================================================

/// Errors raised before any computation when a name does not resolve
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum LookupError {
    #[error("unknown shader: {name}")]
    #[diagnostic(code(ledspin::lookup::unknown_shader))]
    UnknownShader {
        name: String,
        #[help]
        suggestion: Option<String>,
    },

    #[error("unknown center point: {label}")]
    #[diagnostic(
        code(ledspin::lookup::unknown_center),
        help("the named center must be one of the point labels")
    )]
    UnknownCenter { label: String },
}

// ============================================================================
// Ingestion Errors
// ============================================================================

/// Errors raised while reading a `label,x,y` point list
#[derive(Error, Diagnostic, Debug)]
pub enum IngestError {
    #[error("invalid point line: {message}")]
    #[diagnostic(code(ledspin::ingest::syntax))]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("invalid number: {text}")]
    #[diagnostic(code(ledspin::ingest::invalid_number))]
    InvalidNumber {
        text: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("not a finite number")]
        span: SourceSpan,
    },

    #[error("duplicate label: {label}")]
    #[diagnostic(code(ledspin::ingest::duplicate_label))]
    DuplicateLabel {
        label: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("first defined here")]
        first: SourceSpan,
        #[label("defined again here")]
        second: SourceSpan,
    },

    #[error("point list contains no points")]
    #[diagnostic(
        code(ledspin::ingest::empty),
        help("each line should read `label,x,y`")
    )]
    Empty,
}
