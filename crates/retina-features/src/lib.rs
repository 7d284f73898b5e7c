//! Retina Features
//!
//! This crate turns raw pixel data into the fixed-length descriptors defined
//! in `retina-core`. It covers:
//!
//! - **Image source**: directory enumeration and decoding ([`source`])
//! - **Extractors**: the five pixel-based extraction algorithms plus the
//!   kind dispatcher ([`extract`])
//! - **Gradient collaborator**: Sobel gradient magnitude for texture
//!   descriptors ([`gradient`])
//! - **External embeddings**: the precomputed identifier-to-vector table
//!   consumed by the `dnn_embedding` kind ([`embedding`])
//!
//! # Example
//!
//! ```no_run
//! use retina_core::FeatureKind;
//! use retina_features::{extract, source};
//!
//! let image = source::load_image("pic.0001.jpg".as_ref())?;
//! let feature = extract::extract(&image, FeatureKind::Histogram)?;
//! assert_eq!(feature.len(), 4096);
//! # Ok::<(), retina_features::FeatureError>(())
//! ```

pub mod color;
pub mod embedding;
mod error;
pub mod extract;
pub mod gradient;
pub mod source;

pub use embedding::EmbeddingTable;
pub use error::FeatureError;
