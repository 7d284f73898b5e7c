//! Retina Core
//!
//! This crate provides the fundamental types shared by the Retina
//! content-based image retrieval crates.
//!
//! # Overview
//!
//! - [`FeatureVector`] - a fixed-length descriptor extracted from an image,
//!   tagged with the [`FeatureKind`] that produced it
//! - [`FeatureKind`] - the closed set of descriptor kinds; each kind determines
//!   the extraction algorithm, the vector length, and the comparison metric
//! - [`Match`] - a (path, distance) pair returned by a similarity query
//!
//! # Example
//!
//! ```
//! use retina_core::{FeatureKind, FeatureVector};
//!
//! let mut feature = FeatureVector::new(FeatureKind::Baseline, "pic.0001.jpg", vec![3.0, 4.0]);
//! assert_eq!(feature.len(), 2);
//!
//! feature.normalize();
//! assert!((feature.as_slice()[0] - 0.6).abs() < 1e-6);
//! ```

pub mod types;

pub use types::{FeatureKind, FeatureVector, Match};
