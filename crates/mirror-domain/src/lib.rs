//! Mirror Domain Layer
//!
//! This crate contains the core domain model for Mirror. It defines the two
//! kinds of evidence the analysis compares, the shared category vocabulary
//! that makes them comparable, and the trait seams the other layers plug
//! into. It performs no I/O.
//!
//! ## Key Concepts
//!
//! - **Claim**: A self-descriptive statement taken from the self-model document
//! - **Behavior**: A single recorded action taken from the day-keyed log corpus
//! - **Category**: A taxonomy dimension both claims and behaviors map onto
//! - **RecordId**: Name-based identifier, stable across runs over the same input
//!
//! ## Architecture
//!
//! - Pure data and trait definitions only
//! - Extraction lives in `mirror-extractor`, scoring in `mirror-analyzer`
//! - Records are immutable once built; every run rebuilds them from scratch

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod behavior;
pub mod category;
pub mod claim;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use behavior::Behavior;
pub use category::{Category, CategoryMatch};
pub use claim::Claim;
pub use record::{RecordId, SourcePosition};
pub use traits::{CategoryClassifier, Evidence};
