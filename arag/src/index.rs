//! Exact nearest-neighbour search by squared Euclidean distance.
//!
//! Every query scans all stored vectors, so search is O(n · d).

use crate::RetrievalError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Position of the vector in insertion order.
    pub index: usize,
    /// Squared L2 distance to the query.
    pub distance: f32,
}

/// Flat (brute-force) L2 index over fixed-dimension vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatL2Index {
    dimension: usize,
    data: Vec<f32>,
}

impl FlatL2Index {
    pub fn new(dimension: usize) -> Result<Self, RetrievalError> {
        if dimension == 0 {
            return Err(RetrievalError::index("index dimension must be greater than zero"));
        }

        Ok(Self {
            dimension,
            data: Vec::new(),
        })
    }

    /// Appends vectors; their indices continue from the current length.
    ///
    /// Nothing is added when any vector has the wrong dimension.
    pub fn add(&mut self, vectors: &[Vec<f32>]) -> Result<(), RetrievalError> {
        if let Some((position, vector)) = vectors
            .iter()
            .enumerate()
            .find(|(_, vector)| vector.len() != self.dimension)
        {
            return Err(RetrievalError::index(format!(
                "vector {position} has dimension {}, index expects {}",
                vector.len(),
                self.dimension
            )));
        }

        self.data.reserve(vectors.len() * self.dimension);
        for vector in vectors {
            self.data.extend_from_slice(vector);
        }

        Ok(())
    }

    /// Returns up to `k` nearest vectors, nearest first. Equal distances are
    /// ordered by ascending index.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>, RetrievalError> {
        if query.len() != self.dimension {
            return Err(RetrievalError::index(format!(
                "query has dimension {}, index expects {}",
                query.len(),
                self.dimension
            )));
        }

        let mut neighbors = self
            .data
            .chunks_exact(self.dimension)
            .enumerate()
            .map(|(index, vector)| Neighbor {
                index,
                distance: squared_l2(query, vector),
            })
            .collect::<Vec<_>>();

        neighbors.sort_by(|left, right| {
            left.distance
                .total_cmp(&right.distance)
                .then(left.index.cmp(&right.index))
        });
        neighbors.truncate(k);

        Ok(neighbors)
    }

    pub fn len(&self) -> usize {
        self.data.len() / self.dimension
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

fn squared_l2(left: &[f32], right: &[f32]) -> f32 {
    left.iter()
        .zip(right)
        .map(|(a, b)| {
            let delta = a - b;
            delta * delta
        })
        .sum()
}
