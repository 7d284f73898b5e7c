//! Core data types for Retina.
//!
//! This module defines the descriptor model: the feature vector itself, the
//! closed enumeration of descriptor kinds, and the query result type.

mod feature;
mod kind;
mod matched;

pub use feature::FeatureVector;
pub use kind::FeatureKind;
pub use matched::Match;
