//! # grail-vector
//!
//! A pure-Rust in-memory vector index with **exact** nearest-neighbor search
//! under squared Euclidean distance.
//!
//! ## Features
//!
//! - **Pure Rust**: No native dependencies, compiles anywhere Rust does
//! - **Exact search**: Brute-force full scan; results are the true nearest
//!   neighbors, not approximations
//! - **Deterministic ordering**: Ascending distance, ties broken by lower
//!   position
//! - **Immutable after build**: Concurrent searches need no locking
//!
//! ## Quick Start
//!
//! ```rust
//! use grail_vector::VectorIndex;
//!
//! fn main() -> Result<(), grail_vector::Error> {
//!     // Build an index from an ordered batch of vectors
//!     let index = VectorIndex::build(vec![
//!         vec![0.0, 0.0],
//!         vec![1.0, 1.0],
//!         vec![5.0, 5.0],
//!     ])?;
//!
//!     // Search for the two nearest vectors
//!     let hits = index.search(&[1.0, 1.0], 2)?;
//!     assert_eq!(hits[0].position, 1);
//!     assert_eq!(hits[0].distance, 0.0);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Design
//!
//! The index is batch-built once from the full vector set and is immutable
//! afterwards. Position `i` in the search results always refers to the
//! `i`-th vector of the build input, so callers can keep a parallel
//! sequence of payloads (document chunks, records) and resolve hits by
//! plain indexing.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod distance;
pub mod error;
pub mod index;
pub mod types;

// Re-exports for convenience
pub use distance::squared_euclidean;
pub use error::{Error, Result};
pub use index::{IndexStats, VectorIndex};
pub use types::SearchHit;
