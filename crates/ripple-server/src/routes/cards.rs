//! Card endpoints: bulk add, listing, and next-card selection.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::state::AppState;
use ripple_core::types::{CardSummary, NewCard};

/// One card in an add request. Fields are optional at the parse layer so
/// missing text surfaces as a per-index validation error instead of a
/// shapeless body rejection.
#[derive(Debug, Deserialize)]
pub struct CardInput {
    #[serde(default)]
    pub front: Option<String>,
    #[serde(default)]
    pub back: Option<String>,
}

impl From<CardInput> for NewCard {
    fn from(input: CardInput) -> Self {
        NewCard::new(
            input.front.unwrap_or_default(),
            input.back.unwrap_or_default(),
        )
    }
}

/// Request body for adding cards.
///
/// Accepts both the wrapped object shape and a bare array; either is
/// normalized into the strict card-creation type before the deck sees it.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AddCardsRequest {
    Wrapped { cards: Vec<CardInput> },
    Bare(Vec<CardInput>),
}

impl AddCardsRequest {
    fn into_new_cards(self) -> Vec<NewCard> {
        let inputs = match self {
            AddCardsRequest::Wrapped { cards } => cards,
            AddCardsRequest::Bare(cards) => cards,
        };
        inputs.into_iter().map(Into::into).collect()
    }
}

/// Response for adding cards.
#[derive(Debug, Serialize)]
pub struct AddCardsResponse {
    pub status: String,
    pub added: usize,
}

/// Add a batch of cards.
/// POST /api/cards
pub async fn add_cards(
    State(state): State<AppState>,
    Json(request): Json<AddCardsRequest>,
) -> ApiResult<Json<AddCardsResponse>> {
    let added = state.deck.add_cards(request.into_new_cards()).await?;

    Ok(Json(AddCardsResponse {
        status: "ok".to_string(),
        added: added.len(),
    }))
}

/// Get all cards with their mastery levels.
/// GET /api/cards
pub async fn get_all_cards(State(state): State<AppState>) -> ApiResult<Json<Vec<CardSummary>>> {
    Ok(Json(state.deck.all_cards().await))
}

/// Response for the next card to review.
#[derive(Debug, Serialize)]
pub struct NextCardResponse {
    pub id: u64,
    pub question: String,
    pub answer: String,
}

/// Get the next card to review.
/// GET /api/cards/next
pub async fn get_next_card(State(state): State<AppState>) -> ApiResult<Json<NextCardResponse>> {
    let card = state.deck.next_card().await?;

    Ok(Json(NextCardResponse {
        id: card.id,
        question: card.front,
        answer: card.back,
    }))
}
