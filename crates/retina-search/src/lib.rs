//! Retina Search
//!
//! Distance metrics, the exact-scan retrieval engine, and CSV persistence
//! for feature databases. The crate answers one question: given a target
//! descriptor and a database of stored descriptors of the same kind, which
//! stored images are closest?
//!
//! Distances are uniformly lower-is-better; similarity-style metrics are
//! negated before they leave the [`distance`] module.

pub mod distance;
mod engine;
mod error;
mod persist;

pub use engine::RetrievalEngine;
pub use error::SearchError;
