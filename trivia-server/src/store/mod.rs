//! Storage gateway
//!
//! Handlers reach persisted questions and categories only through
//! [`TriviaStore`], so the HTTP layer runs the same against Postgres
//! ([`crate::db::PgStore`]) and the in-memory [`MemoryStore`].

pub mod memory;

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::models::{Category, CategoryKey, NewQuestion, Question};

pub use memory::MemoryStore;

/// Storage error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(String),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

/// Filter condition on the questions collection.
///
/// A slice of predicates is a conjunction; an empty slice matches every row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Question text equals the value exactly
    QuestionEquals(String),
    /// Question text contains the term, ignoring case
    QuestionContains(String),
    /// Category column equals the key
    CategoryEquals(CategoryKey),
    /// Id is not in the set
    IdNotIn(Vec<i32>),
}

impl Predicate {
    /// Evaluate against a loaded row.
    pub fn matches(&self, question: &Question) -> bool {
        match self {
            Self::QuestionEquals(text) => question.question == *text,
            Self::QuestionContains(term) => question
                .question
                .to_lowercase()
                .contains(&term.to_lowercase()),
            Self::CategoryEquals(key) => question.category == key.as_str(),
            Self::IdNotIn(ids) => !ids.contains(&question.id),
        }
    }
}

/// Typed access to questions and categories.
#[async_trait]
pub trait TriviaStore: Send + Sync {
    /// All categories ordered by id.
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError>;

    async fn find_category(&self, id: i32) -> Result<Option<Category>, StoreError>;

    /// All questions ordered by id.
    async fn list_questions(&self) -> Result<Vec<Question>, StoreError>;

    async fn find_question(&self, id: i32) -> Result<Option<Question>, StoreError>;

    /// Questions matching every predicate, ordered by id.
    async fn filter_questions(&self, predicates: &[Predicate]) -> Result<Vec<Question>, StoreError>;

    async fn count_questions(&self) -> Result<i64, StoreError>;

    /// Persist a question and return it with its assigned id.
    async fn insert_question(&self, question: NewQuestion) -> Result<Question, StoreError>;

    /// Permanently remove a question. Fails with `NotFound` when no row
    /// was removed.
    async fn delete_question(&self, id: i32) -> Result<(), StoreError>;
}

/// Read every category into an id -> type mapping.
pub async fn format_categories(
    store: &dyn TriviaStore,
) -> Result<BTreeMap<i32, String>, StoreError> {
    let categories = store.list_categories().await?;
    Ok(categories.into_iter().map(|c| (c.id, c.kind)).collect())
}
