//! Card types and belief-state accessors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A flashcard with its belief state.
///
/// `alpha` and `beta` are the parameters of a Beta distribution over the
/// probability of correct recall. They start at the configured priors and
/// are mutated exclusively by the mastery engine, always by bounded
/// positive increments, so both stay strictly positive for the lifetime
/// of the card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier, monotonically assigned, never reused.
    pub id: u64,
    /// Question side.
    pub front: String,
    /// Answer side.
    pub back: String,
    /// Embedding of the card text, fixed at creation.
    pub embedding: Vec<f32>,
    /// Beta distribution pseudo-count of correct evidence.
    pub alpha: f64,
    /// Beta distribution pseudo-count of incorrect evidence.
    pub beta: f64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Card {
    /// Estimated recall probability: the mean of the Beta distribution.
    ///
    /// Always in (0, 1) while `alpha` and `beta` are positive.
    pub fn mastery(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    /// Belief uncertainty: the variance of the Beta distribution.
    pub fn uncertainty(&self) -> f64 {
        let n = self.alpha + self.beta;
        (self.alpha * self.beta) / (n * n * (n + 1.0))
    }
}

/// A validated card-creation request.
///
/// The HTTP boundary normalizes its loose body shapes into this type
/// before anything touches the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCard {
    pub front: String,
    pub back: String,
}

impl NewCard {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }

    /// The text handed to the embedding provider: both sides, joined.
    pub fn embedding_text(&self) -> String {
        format!("{} {}", self.front.trim(), self.back.trim())
    }
}

/// Card view for listings: identity plus current mastery, no belief
/// internals or embedding payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardSummary {
    pub id: u64,
    pub question: String,
    pub mastery: f64,
    pub created_at: DateTime<Utc>,
}

impl From<&Card> for CardSummary {
    fn from(card: &Card) -> Self {
        Self {
            id: card.id,
            question: card.front.clone(),
            mastery: card.mastery(),
            created_at: card.created_at,
        }
    }
}

/// Result of recording an answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerOutcome {
    /// The reviewed card.
    pub card_id: u64,
    /// Whether the answer was recorded as correct.
    pub correct: bool,
    /// The reviewed card's mastery after the update.
    pub mastery: f64,
    /// How many neighboring cards received a propagated update.
    pub propagated: usize,
}
