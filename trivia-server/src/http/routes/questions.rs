//! Question endpoints

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{delete, get, post},
    Router,
};
use serde::{Deserialize, Deserializer, Serialize};

use super::{id_method_not_allowed, method_not_allowed, QuestionList};
use crate::http::extractors::{JsonBody, UnprocessableJson, ValidId};
use crate::http::response::{ApiResult, Envelope};
use crate::http::server::AppState;
use crate::http::ApiError;
use crate::models::{CategoryKey, NewQuestion, PageQuery, Pagination, Question, ValidationError};
use crate::store::{format_categories, Predicate};

/// Paginated question listing
#[derive(Debug, Serialize)]
pub struct QuestionsPage {
    pub questions: Vec<Question>,
    pub total_questions: i64,
    pub categories: BTreeMap<i32, String>,
    pub current_category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: i32,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub created: i32,
    pub questions: Vec<Question>,
    pub total_questions: i64,
}

/// Add question request. Every field is required; they are optional here
/// so a missing field is a validation error rather than a parse error.
#[derive(Debug, Deserialize)]
pub struct CreateQuestionRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<CategoryKey>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub difficulty: Option<i32>,
}

impl TryFrom<CreateQuestionRequest> for NewQuestion {
    type Error = ValidationError;

    fn try_from(req: CreateQuestionRequest) -> Result<Self, Self::Error> {
        let question = req.question.ok_or(ValidationError::Missing { field: "question" })?;
        let answer = req.answer.ok_or(ValidationError::Missing { field: "answer" })?;
        let category = req.category.ok_or(ValidationError::Missing { field: "category" })?;
        let difficulty = req
            .difficulty
            .ok_or(ValidationError::Missing { field: "difficulty" })?;

        NewQuestion::new(&question, &answer, category, difficulty)
    }
}

/// Search request; an absent or empty term lists everything.
#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm", default)]
    pub search_term: Option<String>,
}

/// Accept `4` or `"4"` (form fields often arrive as strings).
fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i32),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Int(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom("difficulty must be an integer")),
    }
}

/// GET /questions - all questions, ten per page
async fn list_questions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageQuery>,
) -> ApiResult<QuestionsPage> {
    let all = state.store.list_questions().await?;
    let questions = Pagination::from(params).slice(&all);
    let categories = format_categories(state.store.as_ref()).await?;

    if questions.is_empty() {
        return Err(ApiError::not_found("questions page"));
    }

    Ok(Envelope::ok(QuestionsPage {
        questions,
        total_questions: all.len() as i64,
        categories,
        current_category: None,
    }))
}

/// DELETE /questions/{id}
///
/// Every failure here, including an unknown id, is reported as 422.
async fn delete_question(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> ApiResult<DeletedResponse> {
    let question = state
        .store
        .find_question(id)
        .await
        .map_err(ApiError::unprocessable)?
        .ok_or_else(|| ApiError::unprocessable(format!("question '{}' does not exist", id)))?;

    state
        .store
        .delete_question(question.id)
        .await
        .map_err(ApiError::unprocessable)?;

    tracing::info!(id, "question deleted");
    Ok(Envelope::ok(DeletedResponse { deleted: id }))
}

/// POST /add - create a question
async fn create_question(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageQuery>,
    UnprocessableJson(req): UnprocessableJson<CreateQuestionRequest>,
) -> ApiResult<CreatedResponse> {
    // category and difficulty each go to their own column
    let new_question = NewQuestion::try_from(req)?;
    let text = new_question.question().to_owned();

    let created = state
        .store
        .insert_question(new_question)
        .await
        .map_err(ApiError::unprocessable)?;

    let same_text = state
        .store
        .filter_questions(&[Predicate::QuestionEquals(text)])
        .await
        .map_err(ApiError::unprocessable)?;
    let total_questions = state
        .store
        .count_questions()
        .await
        .map_err(ApiError::unprocessable)?;

    tracing::info!(id = created.id, "question created");
    Ok(Envelope::ok(CreatedResponse {
        created: created.id,
        questions: Pagination::from(params).slice(&same_text),
        total_questions,
    }))
}

/// POST /questions/search - case-insensitive substring search
///
/// With a term, `totalQuestions` counts the returned page only; without
/// one it counts every question.
async fn search_questions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageQuery>,
    JsonBody(req): JsonBody<SearchRequest>,
) -> ApiResult<QuestionList> {
    let page = Pagination::from(params);

    let (questions, total_questions) = match req.search_term.filter(|t| !t.is_empty()) {
        Some(term) => {
            let matches = state
                .store
                .filter_questions(&[Predicate::QuestionContains(term)])
                .await
                .map_err(ApiError::unprocessable)?;
            let questions = page.slice(&matches);
            let total = questions.len() as i64;
            (questions, total)
        }
        None => {
            let all = state
                .store
                .list_questions()
                .await
                .map_err(ApiError::unprocessable)?;
            let total = all.len() as i64;
            (page.slice(&all), total)
        }
    };

    Ok(Envelope::ok(QuestionList {
        questions,
        total_questions,
        current_category: None,
    }))
}

/// Question routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/questions", get(list_questions).fallback(method_not_allowed))
        .route(
            "/questions/{id}",
            delete(delete_question).fallback(id_method_not_allowed),
        )
        .route(
            "/questions/search",
            post(search_questions).fallback(method_not_allowed),
        )
        .route("/add", post(create_question).fallback(method_not_allowed))
}
