//! Category endpoints

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};
use serde::Serialize;

use super::{id_method_not_allowed, method_not_allowed, QuestionList};
use crate::http::extractors::ValidId;
use crate::http::response::{ApiResult, Envelope};
use crate::http::server::AppState;
use crate::http::ApiError;
use crate::models::{PageQuery, Pagination};
use crate::store::{format_categories, Predicate};

/// Category mapping response
#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: BTreeMap<i32, String>,
}

/// GET /categories - id -> type mapping
async fn list_categories(State(state): State<Arc<AppState>>) -> ApiResult<CategoriesResponse> {
    let categories = format_categories(state.store.as_ref()).await?;

    if categories.is_empty() {
        return Err(ApiError::not_found("categories"));
    }

    Ok(Envelope::ok(CategoriesResponse { categories }))
}

/// GET /categories/{id}/questions - paginated questions in one category
///
/// An empty page is still a success; only an unknown category is a 404.
async fn list_category_questions(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    Query(params): Query<PageQuery>,
) -> ApiResult<QuestionList> {
    let category = state
        .store
        .find_category(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("category '{}'", id)))?;

    let matches = state
        .store
        .filter_questions(&[Predicate::CategoryEquals(category.key())])
        .await?;
    let questions = Pagination::from(params).slice(&matches);

    Ok(Envelope::ok(QuestionList {
        questions,
        total_questions: matches.len() as i64,
        current_category: Some(category.kind),
    }))
}

/// Category routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(list_categories).fallback(method_not_allowed))
        .route(
            "/categories/{id}/questions",
            get(list_category_questions).fallback(id_method_not_allowed),
        )
}
