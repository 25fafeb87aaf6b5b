//! Next-card selection.
//!
//! Scores every card by how poorly it is known and how uncertain its
//! belief is, and returns the maximum. Ties break to the lowest id: the
//! scan runs in insertion order and only a strictly greater score
//! displaces the current best.

use ordered_float::OrderedFloat;

use crate::error::{RippleError, RippleResult};
use crate::store::CardStore;
use crate::types::Card;

/// Read-only card selection over the store.
#[derive(Debug, Clone)]
pub struct Selector {
    /// Weight on (1 - mastery).
    mastery_weight: f64,
    /// Weight on belief variance.
    uncertainty_weight: f64,
}

impl Selector {
    pub fn new(mastery_weight: f64, uncertainty_weight: f64) -> Self {
        Self {
            mastery_weight,
            uncertainty_weight,
        }
    }

    /// Priority of a single card. Higher means more worth reviewing.
    pub fn priority(&self, card: &Card) -> f64 {
        self.mastery_weight * (1.0 - card.mastery()) + self.uncertainty_weight * card.uncertainty()
    }

    /// The highest-priority card, or an empty-store error.
    pub fn next_card<'a>(&self, store: &'a CardStore) -> RippleResult<&'a Card> {
        let mut best: Option<(&Card, OrderedFloat<f64>)> = None;

        for card in store.list() {
            let score = OrderedFloat(self.priority(card));
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((card, score)),
            }
        }

        best.map(|(card, _)| card).ok_or(RippleError::EmptyStore)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(store: &mut CardStore, alpha: f64, beta: f64) -> u64 {
        let id = store
            .add(format!("q{}", store.len()), "a", vec![1.0])
            .unwrap()
            .id;
        let card = store.get_mut(id).unwrap();
        card.alpha = alpha;
        card.beta = beta;
        id
    }

    #[test]
    fn test_empty_store_is_error() {
        let store = CardStore::new(1.0, 1.0);
        let selector = Selector::new(0.5, 0.5);
        assert!(matches!(
            selector.next_card(&store),
            Err(RippleError::EmptyStore)
        ));
    }

    #[test]
    fn test_single_card_is_selected() {
        let mut store = CardStore::new(1.0, 1.0);
        let id = add(&mut store, 1.0, 1.0);
        let selector = Selector::new(0.5, 0.5);
        assert_eq!(selector.next_card(&store).unwrap().id, id);
    }

    #[test]
    fn test_least_known_card_wins() {
        let mut store = CardStore::new(1.0, 1.0);
        add(&mut store, 10.0, 1.0); // well known
        let weak = add(&mut store, 1.0, 10.0); // poorly known
        let selector = Selector::new(1.0, 0.0);
        assert_eq!(selector.next_card(&store).unwrap().id, weak);
    }

    #[test]
    fn test_uncertainty_breaks_equal_mastery() {
        let mut store = CardStore::new(1.0, 1.0);
        // Same mastery 0.5, different evidence mass: the fresh card has
        // higher variance.
        add(&mut store, 10.0, 10.0);
        let fresh = add(&mut store, 1.0, 1.0);
        let selector = Selector::new(0.5, 0.5);
        assert_eq!(selector.next_card(&store).unwrap().id, fresh);
    }

    #[test]
    fn test_zero_uncertainty_weight_ignores_variance() {
        let mut store = CardStore::new(1.0, 1.0);
        let first = add(&mut store, 10.0, 10.0);
        add(&mut store, 1.0, 1.0);
        // Identical mastery; with w2 = 0 the scores tie exactly and the
        // lowest id wins.
        let selector = Selector::new(1.0, 0.0);
        assert_eq!(selector.next_card(&store).unwrap().id, first);
    }

    #[test]
    fn test_exact_tie_selects_lowest_id() {
        let mut store = CardStore::new(1.0, 1.0);
        let first = add(&mut store, 2.0, 3.0);
        add(&mut store, 2.0, 3.0);
        let selector = Selector::new(0.5, 0.5);
        assert_eq!(selector.next_card(&store).unwrap().id, first);
    }
}
