//! The deck facade: the one object the hosting layer talks to.
//!
//! Owns the card store and the similarity index behind a single lock, plus
//! the injected embedding capability. Mutating operations (adding cards,
//! recording answers) hold the write lock for their whole critical section,
//! so readers never observe a card without its matrix row or a direct
//! update without its propagation. Embedding happens before the lock is
//! taken: a slow or failing provider never blocks readers, and a failed
//! embed never produces a half-created card.
//!
//! State is process-lifetime only. Independently scaled instances do not
//! share it and their mastery estimates will diverge; integrators who run
//! more than one instance must route all traffic to the same one.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::config::DeckConfig;
use crate::error::{RippleError, RippleResult};
use crate::mastery::MasteryEngine;
use crate::selector::Selector;
use crate::similarity::SimilarityIndex;
use crate::store::CardStore;
use crate::traits::Embedder;
use crate::types::{AnswerOutcome, Card, CardSummary, NewCard};

struct DeckState {
    store: CardStore,
    index: SimilarityIndex,
}

/// The mastery engine facade.
pub struct Deck {
    state: RwLock<DeckState>,
    embedder: Arc<dyn Embedder>,
    mastery: MasteryEngine,
    selector: Selector,
    config: DeckConfig,
}

impl Deck {
    /// Create an empty deck.
    pub fn new(config: DeckConfig, embedder: Arc<dyn Embedder>) -> RippleResult<Self> {
        config.validate()?;
        Ok(Self {
            state: RwLock::new(DeckState {
                store: CardStore::new(config.prior_alpha, config.prior_beta),
                index: SimilarityIndex::new(),
            }),
            mastery: MasteryEngine::new(
                config.full_update_weight,
                config.similarity_threshold,
                config.propagation_scale,
            ),
            selector: Selector::new(config.mastery_weight, config.uncertainty_weight),
            embedder,
            config,
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    /// Add a batch of cards.
    ///
    /// The batch is atomic: every card is validated first (failures carry
    /// per-index details and nothing is embedded), then every card is
    /// embedded (the first provider failure aborts before any mutation),
    /// and only then is the store extended, under one write lock.
    pub async fn add_cards(&self, cards: Vec<NewCard>) -> RippleResult<Vec<CardSummary>> {
        if cards.is_empty() {
            return Err(RippleError::validation("No cards provided"));
        }

        let mut details = HashMap::new();
        for (i, card) in cards.iter().enumerate() {
            if card.front.trim().is_empty() {
                details.insert(format!("cards[{}].front", i), "must not be empty".to_string());
            }
            if card.back.trim().is_empty() {
                details.insert(format!("cards[{}].back", i), "must not be empty".to_string());
            }
        }
        if !details.is_empty() {
            return Err(RippleError::validation_with_details(
                "One or more cards have empty text",
                details,
            ));
        }

        let texts: Vec<String> = cards.iter().map(|c| c.embedding_text()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        let mut state = self.state.write().await;
        let mut summaries = Vec::with_capacity(cards.len());
        for (card, embedding) in cards.into_iter().zip(embeddings) {
            let added = state.store.add(card.front, card.back, embedding)?;
            let (id, vector) = (added.id, added.embedding.clone());
            summaries.push(CardSummary::from(added));
            state.index.add_vector(id, &vector)?;
        }

        info!(added = summaries.len(), total = state.store.len(), "cards added");
        Ok(summaries)
    }

    /// Record an answer for a card and propagate it to similar cards.
    pub async fn record_answer(&self, card_id: u64, correct: bool) -> RippleResult<AnswerOutcome> {
        let mut state = self.state.write().await;
        let DeckState { store, index } = &mut *state;
        self.mastery.record_answer(store, index, card_id, correct)
    }

    /// The next card to review.
    pub async fn next_card(&self) -> RippleResult<Card> {
        let state = self.state.read().await;
        self.selector.next_card(&state.store).cloned()
    }

    /// Summaries of all cards in insertion order.
    pub async fn all_cards(&self) -> Vec<CardSummary> {
        let state = self.state.read().await;
        state.store.list().iter().map(CardSummary::from).collect()
    }

    /// Whether the deck holds no cards.
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.store.is_empty()
    }

    /// Number of cards.
    pub async fn len(&self) -> usize {
        self.state.read().await.store.len()
    }

    /// Drop all cards and similarities. Ids are not reused.
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        state.store.clear();
        state.index.clear();
        info!("deck reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Deterministic embedder: maps known words to fixed unit vectors.
    struct StubEmbedder;

    #[async_trait]
    impl Embedder for StubEmbedder {
        async fn embed(&self, text: &str) -> RippleResult<Vec<f32>> {
            if text.contains("fail") {
                return Err(RippleError::embedding("stub failure"));
            }
            Ok(if text.contains("ocean") {
                vec![1.0, 0.0]
            } else {
                vec![0.0, 1.0]
            })
        }

        fn dimension(&self) -> usize {
            2
        }

        fn model_name(&self) -> &str {
            "stub"
        }
    }

    fn deck() -> Deck {
        Deck::new(DeckConfig::default(), Arc::new(StubEmbedder)).unwrap()
    }

    #[tokio::test]
    async fn test_add_and_list() {
        let deck = deck();
        let added = deck
            .add_cards(vec![NewCard::new("ocean depth", "deep")])
            .await
            .unwrap();
        assert_eq!(added.len(), 1);
        assert_eq!(deck.len().await, 1);
        assert_eq!(deck.all_cards().await[0].id, added[0].id);
    }

    #[tokio::test]
    async fn test_validation_reports_indices() {
        let deck = deck();
        let err = deck
            .add_cards(vec![
                NewCard::new("ocean", "blue"),
                NewCard::new("", "orphan"),
            ])
            .await
            .unwrap_err();
        match err {
            RippleError::Validation { details, .. } => {
                assert!(details.contains_key("cards[1].front"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(deck.is_empty().await);
    }

    #[tokio::test]
    async fn test_failed_embed_creates_nothing() {
        let deck = deck();
        let err = deck
            .add_cards(vec![
                NewCard::new("ocean", "blue"),
                NewCard::new("fail here", "x"),
            ])
            .await
            .unwrap_err();
        assert!(matches!(err, RippleError::Embedding { .. }));
        assert!(deck.is_empty().await);
    }

    #[tokio::test]
    async fn test_next_card_empty_deck() {
        let deck = deck();
        assert!(matches!(
            deck.next_card().await,
            Err(RippleError::EmptyStore)
        ));
    }

    #[tokio::test]
    async fn test_answer_unknown_card() {
        let deck = deck();
        let err = deck.record_answer(3, true).await.unwrap_err();
        assert!(matches!(err, RippleError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_reset_empties_deck() {
        let deck = deck();
        deck.add_cards(vec![NewCard::new("ocean", "blue")])
            .await
            .unwrap();
        deck.reset().await;
        assert!(deck.is_empty().await);
    }
}
