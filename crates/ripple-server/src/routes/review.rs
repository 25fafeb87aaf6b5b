//! Answer submission endpoint.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::state::AppState;

/// Request body for submitting an answer.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    /// The reviewed card.
    pub card_id: u64,
    /// Whether the learner answered correctly.
    pub is_correct: bool,
}

/// Response for a recorded answer.
#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub status: String,
    /// The reviewed card's mastery after the update.
    pub mastery: f64,
    /// How many related cards received a propagated update.
    pub propagated: usize,
}

/// Record an answer and propagate it to similar cards.
/// POST /api/answer
pub async fn submit_answer(
    State(state): State<AppState>,
    Json(request): Json<AnswerRequest>,
) -> ApiResult<Json<AnswerResponse>> {
    let outcome = state
        .deck
        .record_answer(request.card_id, request.is_correct)
        .await?;

    Ok(Json(AnswerResponse {
        status: "ok".to_string(),
        mastery: outcome.mastery,
        propagated: outcome.propagated,
    }))
}
