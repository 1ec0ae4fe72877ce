//! Error types for structured error handling.
//!
//! This module provides:
//! - `GeometryError`: Errors from bounding box and curve construction
//! - `EstimateError`: Errors from turning inside counts into an area

use thiserror::Error;

/// Geometry construction errors.
///
/// # Examples
/// ```
/// use estimator_core::types::GeometryError;
///
/// let err = GeometryError::DegenerateBox { left: 0, bottom: 0, right: 0, top: 10 };
/// assert_eq!(
///     format!("{}", err),
///     "Degenerate bounding box: left=0, bottom=0, right=0, top=10 (requires right > left and top > bottom)"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Box with zero or negative width or height.
    #[error(
        "Degenerate bounding box: left={left}, bottom={bottom}, right={right}, top={top} \
         (requires right > left and top > bottom)"
    )]
    DegenerateBox {
        /// Left bound
        left: i32,
        /// Bottom bound
        bottom: i32,
        /// Right bound
        right: i32,
        /// Top bound
        top: i32,
    },

    /// Curve semi-axis that is not a finite positive number.
    #[error("Invalid semi-axis '{name}': {value} (must be finite and positive)")]
    InvalidSemiAxis {
        /// Axis name (`a` or `b`)
        name: &'static str,
        /// Offending value
        value: f64,
    },
}

/// Area estimation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EstimateError {
    /// No samples were requested, so the ratio is undefined.
    #[error("Cannot estimate an area from zero samples")]
    ZeroSamples,

    /// More inside points than samples: the counts come from different runs.
    #[error("Inside count {inside} exceeds sample count {samples}")]
    InsideExceedsSamples {
        /// Inside count
        inside: u64,
        /// Sample count
        samples: u64,
    },
}
