//! Core geometry and error types.
//!
//! This module provides:
//! - `geometry`: Integer [`Rectangle`] bounding boxes and [`Point`] samples
//! - `error`: Structured error types for geometry construction and estimation
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level.

pub mod error;
pub mod geometry;

pub use error::{EstimateError, GeometryError};
pub use geometry::{Point, Rectangle};
