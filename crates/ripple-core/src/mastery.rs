//! Bayesian belief updates with correlated propagation.
//!
//! Answering a card is one pseudo-observation on that card's Beta belief.
//! The same outcome is also weak evidence about semantically related cards,
//! so every neighbor above the similarity threshold receives a fractional
//! update scaled by its similarity. Propagation weight is linear in
//! similarity: `propagation_scale * s`.

use tracing::debug;

use crate::error::RippleResult;
use crate::similarity::SimilarityIndex;
use crate::store::CardStore;
use crate::types::{AnswerOutcome, Card};

/// Applies review outcomes to card beliefs.
#[derive(Debug, Clone)]
pub struct MasteryEngine {
    /// Direct update weight on the reviewed card.
    full_update_weight: f64,
    /// Neighbors at or below this similarity are untouched.
    similarity_threshold: f64,
    /// Multiplier on neighbor similarity for the propagated weight.
    propagation_scale: f64,
}

impl MasteryEngine {
    pub fn new(full_update_weight: f64, similarity_threshold: f64, propagation_scale: f64) -> Self {
        Self {
            full_update_weight,
            similarity_threshold,
            propagation_scale,
        }
    }

    /// Record an answer for a card, updating it and its neighbors.
    ///
    /// The direct update adds `full_update_weight` to `alpha` (correct) or
    /// `beta` (incorrect). Each neighbor `(j, s)` above the threshold gets
    /// the same-signed update with weight `propagation_scale * s`. All
    /// increments are positive, so `alpha` and `beta` stay strictly
    /// positive. The whole sequence is deterministic for a fixed store,
    /// index, and event order.
    ///
    /// Fails with a not-found error for an unknown card id. An empty
    /// neighbor set is not an error.
    pub fn record_answer(
        &self,
        store: &mut CardStore,
        index: &SimilarityIndex,
        card_id: u64,
        correct: bool,
    ) -> RippleResult<AnswerOutcome> {
        // Resolve neighbors first; this also rejects unknown ids before
        // any belief is touched.
        let neighbors = index.neighbors_above(card_id, self.similarity_threshold)?;

        let card = store.get_mut(card_id)?;
        apply_update(card, correct, self.full_update_weight);
        let mastery = card.mastery();

        for &(neighbor_id, similarity) in &neighbors {
            let weight = self.propagation_scale * f64::from(similarity);
            let neighbor = store.get_mut(neighbor_id)?;
            apply_update(neighbor, correct, weight);
        }

        debug!(
            card_id,
            correct,
            mastery,
            propagated = neighbors.len(),
            "answer recorded"
        );

        Ok(AnswerOutcome {
            card_id,
            correct,
            mastery,
            propagated: neighbors.len(),
        })
    }
}

fn apply_update(card: &mut Card, correct: bool, weight: f64) {
    if correct {
        card.alpha += weight;
    } else {
        card.beta += weight;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> MasteryEngine {
        MasteryEngine::new(1.0, 0.4, 0.5)
    }

    fn setup(vectors: &[Vec<f32>]) -> (CardStore, SimilarityIndex) {
        let mut store = CardStore::new(1.0, 1.0);
        let mut index = SimilarityIndex::new();
        for (i, v) in vectors.iter().enumerate() {
            let card = store
                .add(format!("q{}", i), format!("a{}", i), v.clone())
                .unwrap();
            let (id, embedding) = (card.id, card.embedding.clone());
            index.add_vector(id, &embedding).unwrap();
        }
        (store, index)
    }

    #[test]
    fn test_correct_answer_raises_mastery() {
        let (mut store, index) = setup(&[vec![1.0, 0.0]]);
        let before = store.get(0).unwrap().mastery();
        engine().record_answer(&mut store, &index, 0, true).unwrap();
        assert!(store.get(0).unwrap().mastery() > before);
    }

    #[test]
    fn test_incorrect_answer_lowers_mastery() {
        let (mut store, index) = setup(&[vec![1.0, 0.0]]);
        let before = store.get(0).unwrap().mastery();
        engine()
            .record_answer(&mut store, &index, 0, false)
            .unwrap();
        assert!(store.get(0).unwrap().mastery() < before);
    }

    #[test]
    fn test_direct_update_is_linear() {
        let (mut store, index) = setup(&[vec![1.0, 0.0]]);
        let e = engine();
        e.record_answer(&mut store, &index, 0, true).unwrap();
        e.record_answer(&mut store, &index, 0, true).unwrap();
        // No neighbors: alpha is exactly prior + 2 * full_update_weight.
        assert_eq!(store.get(0).unwrap().alpha, 3.0);
        assert_eq!(store.get(0).unwrap().beta, 1.0);
    }

    #[test]
    fn test_propagates_to_similar_card() {
        let (mut store, index) = setup(&[vec![1.0, 0.0], vec![1.0, 0.0]]);
        engine()
            .record_answer(&mut store, &index, 0, false)
            .unwrap();
        let neighbor = store.get(1).unwrap();
        assert_eq!(neighbor.alpha, 1.0);
        // Similarity 1.0, scale 0.5: beta gains exactly 0.5.
        assert!((neighbor.beta - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_below_threshold_card_untouched() {
        let (mut store, index) = setup(&[vec![1.0, 0.0], vec![0.0, 1.0]]);
        engine().record_answer(&mut store, &index, 0, true).unwrap();
        let unrelated = store.get(1).unwrap();
        assert_eq!(unrelated.alpha, 1.0);
        assert_eq!(unrelated.beta, 1.0);
    }

    #[test]
    fn test_outcome_reports_propagation_count() {
        let (mut store, index) = setup(&[vec![1.0, 0.0], vec![1.0, 0.1], vec![0.0, 1.0]]);
        let outcome = engine().record_answer(&mut store, &index, 0, true).unwrap();
        assert_eq!(outcome.card_id, 0);
        assert_eq!(outcome.propagated, 1);
        assert!(outcome.mastery > 0.5);
    }

    #[test]
    fn test_unknown_card_is_error() {
        let (mut store, index) = setup(&[vec![1.0, 0.0]]);
        assert!(engine().record_answer(&mut store, &index, 5, true).is_err());
    }

    #[test]
    fn test_parameters_stay_positive() {
        let (mut store, index) = setup(&[vec![1.0, 0.0], vec![1.0, 0.0]]);
        let e = engine();
        for _ in 0..100 {
            e.record_answer(&mut store, &index, 0, false).unwrap();
        }
        for card in store.list() {
            assert!(card.alpha > 0.0);
            assert!(card.beta > 0.0);
            let mastery = card.mastery();
            assert!(mastery > 0.0 && mastery < 1.0);
        }
    }
}
