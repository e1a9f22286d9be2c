//! Common types for grail-vector.

/// Result of a vector search.
///
/// Hits are ordered by ascending distance; ties are broken by lower
/// position, so result order is fully deterministic.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchHit {
    /// Position of the matched vector in the build input (0-based).
    pub position: usize,
    /// Squared Euclidean distance to the query (lower = more similar).
    pub distance: f32,
}

impl SearchHit {
    /// Create a new search hit.
    pub fn new(position: usize, distance: f32) -> Self {
        Self { position, distance }
    }
}
