//! # estimator_core: Foundation Types for Monte Carlo Area Estimation
//!
//! ## Layer 1 (Foundation) Role
//!
//! estimator_core is the bottom layer of the workspace, providing:
//! - Geometry primitives: [`Rectangle`], [`Point`] (`types::geometry`)
//! - The curve predicate abstraction: [`Curve`], [`Ellipse`] (`curve`)
//! - The area estimator: [`estimate_area`], [`AreaEstimate`] (`estimate`)
//! - Error types: [`GeometryError`], [`EstimateError`] (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other workspace crates and no runtime
//! dependencies beyond `thiserror`. Random number
//! generation and parallel execution live in `estimator_engine`.
//!
//! ## Usage Example
//!
//! ```rust
//! use estimator_core::{estimate_area, Curve, Ellipse, Point, Rectangle};
//!
//! let bounding_box = Rectangle::new(-100, -50, 100, 50).unwrap();
//! let ellipse = Ellipse::reference();
//!
//! assert!(ellipse.contains(Point::new(100, 0)));
//! assert!(!ellipse.contains(Point::new(100, 50)));
//!
//! // 7854 of 10_000 samples inside the ellipse
//! let estimate = estimate_area(7_854, &bounding_box, 10_000).unwrap();
//! assert!((estimate.value() - 15_708.0).abs() < 1e-9);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod curve;
pub mod estimate;
pub mod types;

pub use curve::{Curve, Ellipse};
pub use estimate::{estimate_area, AreaEstimate};
pub use types::{EstimateError, GeometryError, Point, Rectangle};
