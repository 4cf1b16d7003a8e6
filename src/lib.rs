//! Orientation angles for LEDs on a circuit board.
//!
//! A board is a list of labelled [`Point`]s. A shader from the [`Registry`]
//! maps each point's position relative to a center onto an angle, and
//! [`compute_angles`] applies the shader and the [`GlobalParams`] to the
//! whole board:
//!
//! ```
//! use ledspin::{ParamValues, Point, Registry, compute_angles};
//!
//! let registry = Registry::builtin()?;
//! let board = vec![Point::new("D1", 0.0, 0.0), Point::new("D2", 10.0, 0.0)];
//! let values = ParamValues::new().with("angle", std::f64::consts::FRAC_PI_2);
//! let angles = compute_angles(&registry, &board, "fixed", &values, &ParamValues::new())?;
//! assert!(angles.iter().all(|a| a.angle_degrees == 90.0));
//! # Ok::<(), miette::Report>(())
//! ```

pub mod defaults;
pub mod errors;
pub mod export;
pub mod geometry;
pub mod ingest;
pub mod log;
pub mod param;
pub mod pipeline;
pub mod shader;
pub mod state;
pub mod types;

pub use errors::{IngestError, LookupError, ParamError, RegistryError};
pub use export::{Orientation, to_csv};
pub use ingest::parse_points;
pub use param::{BoundParams, ParamDescriptor, ParamType, ParamValue, ParamValues};
pub use pipeline::{
    AngleResult, CenterMode, GlobalParams, NearCenter, PipelineOptions, compute_angles,
    compute_angles_with, evaluate_points,
};
pub use shader::{Catalog, Evaluate, Registry, Shader, ShaderArgs, ShaderEntry};
pub use state::ShaderState;
pub use types::{Bounds, Point, Unit};
