//! Route handlers organized by resource

pub mod categories;
pub mod health;
pub mod questions;
pub mod quizzes;

use serde::Serialize;

use crate::http::extractors::ValidId;
use crate::http::ApiError;
use crate::models::Question;

/// Question listing in the camelCase shape used by search and
/// per-category listings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionList {
    pub questions: Vec<Question>,
    pub total_questions: i64,
    pub current_category: Option<String>,
}

/// Method fallback for fixed paths.
pub(crate) async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Method fallback for `{id}` paths. A non-integer id means no route
/// matched at all, which `ValidId` reports as 404.
pub(crate) async fn id_method_not_allowed(ValidId(_): ValidId) -> ApiError {
    ApiError::MethodNotAllowed
}
