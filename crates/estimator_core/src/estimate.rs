//! Monte Carlo area estimator.
//!
//! Converts an aggregated inside count into an area:
//!
//! ```text
//! area = box_area * total_inside / total_samples
//! ```
//!
//! The result is a write-once [`AreaEstimate`] that keeps the inputs it was
//! derived from for reporting.

use std::fmt;

use crate::types::{EstimateError, Rectangle};

/// Area estimate for one run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AreaEstimate {
    value: f64,
    inside: u64,
    samples: u64,
    box_area: f64,
}

impl AreaEstimate {
    /// Estimated area in unit-square units.
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Total inside count the estimate was derived from.
    #[inline]
    pub fn inside(&self) -> u64 {
        self.inside
    }

    /// Total sample count the estimate was derived from.
    #[inline]
    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Area of the bounding box.
    #[inline]
    pub fn box_area(&self) -> f64 {
        self.box_area
    }

    /// Fraction of samples classified inside.
    #[inline]
    pub fn hit_ratio(&self) -> f64 {
        self.inside as f64 / self.samples as f64
    }

    /// Absolute difference from a reference area.
    #[inline]
    pub fn abs_error(&self, reference: f64) -> f64 {
        (self.value - reference).abs()
    }
}

impl fmt::Display for AreaEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.value)
    }
}

/// Estimates the curve area from the aggregated inside count.
///
/// # Arguments
///
/// * `total_inside` - Points classified inside the curve, summed over all workers
/// * `bounding_box` - Box the samples were drawn from
/// * `total_samples` - Requested sample budget for the run
///
/// # Errors
///
/// - [`EstimateError::ZeroSamples`] if `total_samples` is zero
/// - [`EstimateError::InsideExceedsSamples`] if `total_inside > total_samples`
///
/// # Examples
///
/// ```
/// use estimator_core::{estimate_area, Rectangle};
///
/// let rect = Rectangle::new(-100, -50, 100, 50).unwrap();
///
/// assert_eq!(estimate_area(0, &rect, 1_000).unwrap().value(), 0.0);
/// assert_eq!(estimate_area(1_000, &rect, 1_000).unwrap().value(), 20_000.0);
/// ```
pub fn estimate_area(
    total_inside: u64,
    bounding_box: &Rectangle,
    total_samples: u64,
) -> Result<AreaEstimate, EstimateError> {
    if total_samples == 0 {
        return Err(EstimateError::ZeroSamples);
    }
    if total_inside > total_samples {
        return Err(EstimateError::InsideExceedsSamples {
            inside: total_inside,
            samples: total_samples,
        });
    }

    let box_area = bounding_box.area();
    let value = (box_area * total_inside as f64) / total_samples as f64;

    Ok(AreaEstimate {
        value,
        inside: total_inside,
        samples: total_samples,
        box_area,
    })
}
