//! Pairwise cosine similarity index over card embeddings.
//!
//! The index keeps the full symmetric matrix so lookups during selection
//! and propagation are O(1). Extending it is linear in the current card
//! count, which is acceptable because additions are rare relative to reads.

use std::collections::HashMap;

use crate::error::{RippleError, RippleResult};

/// Symmetric cosine similarity matrix keyed by card id pairs.
#[derive(Debug, Default)]
pub struct SimilarityIndex {
    /// Registered ids in registration order.
    ids: Vec<u64>,
    /// Embeddings by id, kept to extend the matrix on add.
    vectors: HashMap<u64, Vec<f32>>,
    /// Pairwise similarities; both (a, b) and (b, a) are stored.
    matrix: HashMap<(u64, u64), f32>,
}

impl SimilarityIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card's embedding, computing its similarity to every
    /// existing embedding.
    ///
    /// Must be called exactly once per card, after the card exists in the
    /// store and before it can be selected or used in propagation.
    pub fn add_vector(&mut self, id: u64, embedding: &[f32]) -> RippleResult<()> {
        if self.vectors.contains_key(&id) {
            return Err(RippleError::validation(format!(
                "Card {} is already indexed",
                id
            )));
        }

        for (&other_id, other_vec) in &self.vectors {
            let score = cosine_similarity(embedding, other_vec);
            self.matrix.insert((id, other_id), score);
            self.matrix.insert((other_id, id), score);
        }
        self.matrix.insert((id, id), 1.0);

        self.ids.push(id);
        self.vectors.insert(id, embedding.to_vec());
        Ok(())
    }

    /// Similarity between two indexed cards, in [-1, 1].
    pub fn similarity(&self, a: u64, b: u64) -> RippleResult<f32> {
        if !self.vectors.contains_key(&a) {
            return Err(RippleError::card_not_found(a));
        }
        if !self.vectors.contains_key(&b) {
            return Err(RippleError::card_not_found(b));
        }
        Ok(self.matrix[&(a, b)])
    }

    /// All other cards whose similarity to `id` is strictly above
    /// `threshold`, in ascending id order.
    pub fn neighbors_above(&self, id: u64, threshold: f64) -> RippleResult<Vec<(u64, f32)>> {
        if !self.vectors.contains_key(&id) {
            return Err(RippleError::card_not_found(id));
        }

        let mut neighbors: Vec<(u64, f32)> = self
            .ids
            .iter()
            .filter(|&&other| other != id)
            .filter_map(|&other| {
                let score = self.matrix[&(id, other)];
                (f64::from(score) > threshold).then_some((other, score))
            })
            .collect();
        neighbors.sort_by_key(|&(other, _)| other);
        Ok(neighbors)
    }

    /// Whether a card is indexed.
    pub fn contains(&self, id: u64) -> bool {
        self.vectors.contains_key(&id)
    }

    /// Number of indexed cards.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.ids.clear();
        self.vectors.clear();
        self.matrix.clear();
    }
}

/// Calculate cosine similarity between two vectors.
///
/// Defined as 0 when either vector has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "Vectors must have same dimension");

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
