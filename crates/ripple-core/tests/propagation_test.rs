//! Integration tests for mastery propagation through the deck facade.
//!
//! Exercises the full add -> answer -> select flow with a deterministic
//! stub embedder, covering the cross-card propagation behavior that the
//! unit tests only touch component by component.

use std::sync::Arc;

use async_trait::async_trait;
use ripple_core::{Deck, DeckConfig, Embedder, NewCard, RippleError, RippleResult};

/// Deterministic embedder keyed on topic words.
///
/// Texts about the same topic map to identical vectors (similarity 1);
/// different topics map to orthogonal vectors (similarity 0).
struct TopicEmbedder;

#[async_trait]
impl Embedder for TopicEmbedder {
    async fn embed(&self, text: &str) -> RippleResult<Vec<f32>> {
        Ok(if text.contains("photosynthesis") {
            vec![1.0, 0.0, 0.0]
        } else if text.contains("chlorophyll") {
            // Same topic as photosynthesis, slightly rotated.
            vec![0.98, 0.199, 0.0]
        } else {
            vec![0.0, 0.0, 1.0]
        })
    }

    fn dimension(&self) -> usize {
        3
    }

    fn model_name(&self) -> &str {
        "topic-stub"
    }
}

fn deck() -> Deck {
    Deck::new(DeckConfig::default(), Arc::new(TopicEmbedder)).unwrap()
}

#[tokio::test]
async fn test_wrong_answer_propagates_to_near_duplicate() {
    let deck = deck();
    let added = deck
        .add_cards(vec![
            NewCard::new("What does photosynthesis produce?", "Oxygen and glucose"),
            NewCard::new("Where does photosynthesis happen?", "In the chloroplasts"),
        ])
        .await
        .unwrap();

    let second_before = deck.all_cards().await[1].mastery;
    deck.record_answer(added[0].id, false).await.unwrap();
    let second_after = deck.all_cards().await[1].mastery;

    // The second card was never answered directly, yet its mastery drops.
    assert!(second_after < second_before);
}

#[tokio::test]
async fn test_correct_answer_propagates_to_related_topic() {
    let deck = deck();
    let added = deck
        .add_cards(vec![
            NewCard::new("Define photosynthesis", "Light to chemical energy"),
            NewCard::new("What pigment is chlorophyll?", "The green one"),
        ])
        .await
        .unwrap();

    let related_before = deck.all_cards().await[1].mastery;
    deck.record_answer(added[0].id, true).await.unwrap();
    let related_after = deck.all_cards().await[1].mastery;

    assert!(related_after > related_before);
}

#[tokio::test]
async fn test_unrelated_card_keeps_exact_priors() {
    let deck = deck();
    let added = deck
        .add_cards(vec![
            NewCard::new("Define photosynthesis", "Light to chemical energy"),
            NewCard::new("Capital of France", "Paris"),
        ])
        .await
        .unwrap();

    for _ in 0..5 {
        deck.record_answer(added[0].id, true).await.unwrap();
        deck.record_answer(added[0].id, false).await.unwrap();
    }

    // Orthogonal topic: mastery is still exactly the uniform-prior mean.
    let unrelated = &deck.all_cards().await[1];
    assert_eq!(unrelated.mastery, 0.5);
}

#[tokio::test]
async fn test_answer_outcome_counts_neighbors() {
    let deck = deck();
    let added = deck
        .add_cards(vec![
            NewCard::new("Define photosynthesis", "Light to chemical energy"),
            NewCard::new("What pigment is chlorophyll?", "The green one"),
            NewCard::new("Capital of France", "Paris"),
        ])
        .await
        .unwrap();

    let outcome = deck.record_answer(added[0].id, true).await.unwrap();
    assert_eq!(outcome.propagated, 1);
}

#[tokio::test]
async fn test_selection_prefers_the_card_just_missed() {
    let deck = deck();
    let added = deck
        .add_cards(vec![
            NewCard::new("Define photosynthesis", "Light to chemical energy"),
            NewCard::new("Capital of France", "Paris"),
        ])
        .await
        .unwrap();

    // Miss the first card twice; it is now the least known.
    deck.record_answer(added[0].id, false).await.unwrap();
    deck.record_answer(added[0].id, false).await.unwrap();

    let next = deck.next_card().await.unwrap();
    assert_eq!(next.id, added[0].id);
}

#[tokio::test]
async fn test_first_card_is_selected_after_single_add() {
    let deck = deck();
    let added = deck
        .add_cards(vec![NewCard::new("Define photosynthesis", "Energy")])
        .await
        .unwrap();

    let next = deck.next_card().await.unwrap();
    assert_eq!(next.id, added[0].id);
    assert_eq!(next.front, "Define photosynthesis");
}

#[tokio::test]
async fn test_empty_deck_selection_is_typed_error() {
    let deck = deck();
    assert!(matches!(
        deck.next_card().await,
        Err(RippleError::EmptyStore)
    ));
}
