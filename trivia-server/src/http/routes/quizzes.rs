//! Quiz endpoint

use std::sync::Arc;

use axum::{extract::State, routing::post, Router};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::method_not_allowed;
use crate::http::extractors::UnprocessableJson;
use crate::http::response::{ApiResult, Envelope};
use crate::http::server::AppState;
use crate::http::ApiError;
use crate::models::{CategoryKey, Question};
use crate::store::Predicate;

/// Quiz request
#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    pub previous_questions: Vec<i32>,
    pub quiz_category: QuizCategory,
}

/// Selected category; id 0 selects every category.
#[derive(Debug, Deserialize)]
pub struct QuizCategory {
    pub id: CategoryKey,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub question: Question,
}

impl QuizRequest {
    /// Predicates selecting the candidate set.
    fn candidate_filter(self) -> Vec<Predicate> {
        let mut predicates = vec![Predicate::IdNotIn(self.previous_questions)];
        if !self.quiz_category.id.is_all() {
            predicates.push(Predicate::CategoryEquals(self.quiz_category.id));
        }
        predicates
    }
}

/// POST /quizzes - draw a random question not yet seen
async fn play_quiz(
    State(state): State<Arc<AppState>>,
    UnprocessableJson(req): UnprocessableJson<QuizRequest>,
) -> ApiResult<QuizResponse> {
    let candidates = state
        .store
        .filter_questions(&req.candidate_filter())
        .await
        .map_err(ApiError::unprocessable)?;

    let question = candidates
        .choose(&mut rand::thread_rng())
        .cloned()
        .ok_or(ApiError::NoCandidates)?;

    tracing::debug!(id = question.id, remaining = candidates.len() - 1, "quiz question drawn");
    Ok(Envelope::ok(QuizResponse { question }))
}

/// Quiz routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/quizzes", post(play_quiz).fallback(method_not_allowed))
}
