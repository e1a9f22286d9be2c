//! Exact nearest-neighbor index.
//!
//! A batch-built, immutable flat index. Search is a brute-force scan over
//! every stored vector; correctness over asymptotic speed is the contract
//! here, and for corpus sizes in the tens of thousands a linear scan over
//! contiguous memory is fast enough in practice.

use crate::distance::squared_euclidean;
use crate::error::{Error, Result};
use crate::types::SearchHit;
use tracing::debug;

/// An immutable vector index with exact nearest-neighbor search.
///
/// Built once from an ordered batch of equal-length vectors. Position `i`
/// in search results always denotes the `i`-th vector of the build input.
/// Because the index never changes after [`VectorIndex::build`], shared
/// references can be searched from any number of threads concurrently.
pub struct VectorIndex {
    /// Stored vectors, in build-input order.
    vectors: Vec<Vec<f32>>,
    /// Vector dimensions, fixed at build time.
    dimensions: usize,
}

impl VectorIndex {
    /// Build an index from an ordered batch of vectors.
    ///
    /// The dimension of the index is taken from the first vector; every
    /// other vector must match it.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyIndex`] if `vectors` is empty.
    /// - [`Error::DimensionMismatch`] if any vector's length differs from
    ///   the first vector's.
    /// - [`Error::InvalidVector`] if any vector is zero-dimensional or
    ///   contains NaN/Inf components (those would poison the distance
    ///   ordering).
    pub fn build(vectors: Vec<Vec<f32>>) -> Result<Self> {
        let Some(first) = vectors.first() else {
            return Err(Error::EmptyIndex);
        };

        let dimensions = first.len();
        if dimensions == 0 {
            return Err(Error::InvalidVector("Dimensions must be > 0".to_string()));
        }

        for (position, vector) in vectors.iter().enumerate() {
            if vector.len() != dimensions {
                return Err(Error::DimensionMismatch {
                    expected: dimensions,
                    actual: vector.len(),
                });
            }
            if vector.iter().any(|v| v.is_nan() || v.is_infinite()) {
                return Err(Error::InvalidVector(format!(
                    "Vector at position {} contains NaN or Inf",
                    position
                )));
            }
        }

        debug!(count = vectors.len(), dimensions, "Built vector index");

        Ok(Self {
            vectors,
            dimensions,
        })
    }

    /// Get the vector dimensions.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Get the number of vectors in the index.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Check if the index is empty.
    ///
    /// Always `false` for a built index; provided for API completeness.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Search for the `top_k` nearest vectors to `query`.
    ///
    /// Performs an exact full scan and returns up to `top_k` hits sorted
    /// by ascending squared Euclidean distance, ties broken by lower
    /// position. Requesting more hits than the index holds returns all of
    /// them, without error. `top_k == 0` returns an empty vector.
    ///
    /// # Errors
    ///
    /// - [`Error::DimensionMismatch`] if the query length differs from
    ///   the index dimensions.
    /// - [`Error::InvalidVector`] if the query contains NaN or Inf.
    pub fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<SearchHit>> {
        if query.len() != self.dimensions {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions,
                actual: query.len(),
            });
        }
        if query.iter().any(|v| v.is_nan() || v.is_infinite()) {
            return Err(Error::InvalidVector(
                "Query contains NaN or Inf".to_string(),
            ));
        }

        let mut hits: Vec<SearchHit> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(position, vector)| SearchHit::new(position, squared_euclidean(query, vector)))
            .collect();

        // NaN is rejected above, so total_cmp orders distances exactly like
        // the naive partial order would; the position key pins tie order.
        hits.sort_unstable_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then(a.position.cmp(&b.position))
        });
        hits.truncate(top_k);

        debug!(count = hits.len(), top_k, "Search completed");
        Ok(hits)
    }

    /// Get a stored vector by position.
    pub fn get(&self, position: usize) -> Option<&[f32]> {
        self.vectors.get(position).map(Vec::as_slice)
    }

    /// Approximate memory usage of the stored vectors in bytes.
    pub fn memory_usage(&self) -> usize {
        self.vectors.len() * self.dimensions * std::mem::size_of::<f32>()
    }

    /// Get index statistics.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            vector_count: self.vectors.len(),
            dimensions: self.dimensions,
            memory_bytes: self.memory_usage(),
        }
    }
}

/// Statistics about an index.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexStats {
    /// Number of vectors in the index.
    pub vector_count: usize,
    /// Dimensionality of vectors.
    pub dimensions: usize,
    /// Approximate memory usage in bytes.
    pub memory_bytes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> VectorIndex {
        VectorIndex::build(vec![vec![0.0, 0.0], vec![1.0, 1.0], vec![5.0, 5.0]]).unwrap()
    }

    #[test]
    fn test_build_empty_fails() {
        let result = VectorIndex::build(vec![]);
        assert!(matches!(result, Err(Error::EmptyIndex)));
    }

    #[test]
    fn test_build_mixed_dimensions_fails() {
        let result = VectorIndex::build(vec![vec![1.0, 2.0], vec![1.0, 2.0, 3.0]]);
        assert!(matches!(
            result,
            Err(Error::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_build_rejects_nan() {
        let result = VectorIndex::build(vec![vec![1.0, f32::NAN]]);
        assert!(matches!(result, Err(Error::InvalidVector(_))));
    }

    #[test]
    fn test_build_rejects_zero_dimensions() {
        let result = VectorIndex::build(vec![vec![]]);
        assert!(matches!(result, Err(Error::InvalidVector(_))));
    }

    #[test]
    fn test_search_nearest_first() {
        // Query [1,1]: distances are 0 to position 1, 2 to position 0,
        // and 32 to position 2.
        let index = sample_index();
        let hits = index.search(&[1.0, 1.0], 2).unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].position, 1);
        assert_eq!(hits[0].distance, 0.0);
        assert_eq!(hits[1].position, 0);
        assert_eq!(hits[1].distance, 2.0);
    }

    #[test]
    fn test_search_stored_vector_is_exact_match() {
        let index = sample_index();
        for (position, query) in [[0.0, 0.0], [1.0, 1.0], [5.0, 5.0]].iter().enumerate() {
            let hits = index.search(query, 1).unwrap();
            assert_eq!(hits[0].position, position);
            assert_eq!(hits[0].distance, 0.0);
        }
    }

    #[test]
    fn test_search_top_k_larger_than_index() {
        let index = sample_index();
        let hits = index.search(&[0.0, 0.0], 10).unwrap();
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn test_search_top_k_zero_returns_empty() {
        let index = sample_index();
        let hits = index.search(&[0.0, 0.0], 0).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_search_ties_broken_by_position() {
        let index = VectorIndex::build(vec![
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![0.0, 1.0],
        ])
        .unwrap();

        // All four vectors are equidistant from the origin
        let hits = index.search(&[0.0, 0.0], 4).unwrap();
        let positions: Vec<usize> = hits.iter().map(|h| h.position).collect();
        assert_eq!(positions, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_search_query_dimension_mismatch() {
        let index = sample_index();
        let result = index.search(&[1.0, 2.0, 3.0], 1);
        assert!(matches!(
            result,
            Err(Error::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_search_rejects_nan_query() {
        let index = sample_index();
        let result = index.search(&[f32::NAN, 0.0], 1);
        assert!(matches!(result, Err(Error::InvalidVector(_))));
    }

    #[test]
    fn test_search_distances_non_decreasing_random() {
        use rand::Rng;

        let mut rng = rand::rng();
        let vectors: Vec<Vec<f32>> = (0..200)
            .map(|_| (0..16).map(|_| rng.random_range(-1.0..1.0)).collect())
            .collect();
        let index = VectorIndex::build(vectors).unwrap();

        let query: Vec<f32> = (0..16).map(|_| rng.random_range(-1.0..1.0)).collect();
        let hits = index.search(&query, 50).unwrap();

        assert_eq!(hits.len(), 50);
        for pair in hits.windows(2) {
            assert!(pair[0].distance <= pair[1].distance);
        }
    }

    #[test]
    fn test_stats() {
        let index = sample_index();
        let stats = index.stats();
        assert_eq!(stats.vector_count, 3);
        assert_eq!(stats.dimensions, 2);
        assert_eq!(stats.memory_bytes, 3 * 2 * 4);
    }

    #[test]
    fn test_get() {
        let index = sample_index();
        assert_eq!(index.get(1), Some(&[1.0, 1.0][..]));
        assert!(index.get(3).is_none());
    }
}
