//! In-memory store
//!
//! Mirrors the Postgres store's ordering and error semantics. Backs the
//! router tests and `trivia serve --in-memory`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Predicate, StoreError, TriviaStore};
use crate::models::{Category, NewQuestion, Question};

#[derive(Default)]
struct Tables {
    categories: BTreeMap<i32, Category>,
    questions: BTreeMap<i32, Question>,
    next_question_id: i32,
}

/// Store keeping both tables in id-ordered maps.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with categories numbered from 1 in the given order.
    pub fn with_categories<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let categories = names
            .into_iter()
            .zip(1..)
            .map(|(name, id)| (id, Category::new(id, name)))
            .collect();

        Self {
            tables: RwLock::new(Tables {
                categories,
                ..Tables::default()
            }),
        }
    }

    /// Add a category unless one with the same id already exists.
    pub async fn add_category(&self, category: Category) {
        self.tables
            .write()
            .await
            .categories
            .entry(category.id)
            .or_insert(category);
    }
}

#[async_trait]
impl TriviaStore for MemoryStore {
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self.tables.read().await.categories.values().cloned().collect())
    }

    async fn find_category(&self, id: i32) -> Result<Option<Category>, StoreError> {
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn list_questions(&self) -> Result<Vec<Question>, StoreError> {
        Ok(self.tables.read().await.questions.values().cloned().collect())
    }

    async fn find_question(&self, id: i32) -> Result<Option<Question>, StoreError> {
        Ok(self.tables.read().await.questions.get(&id).cloned())
    }

    async fn filter_questions(&self, predicates: &[Predicate]) -> Result<Vec<Question>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .questions
            .values()
            .filter(|q| predicates.iter().all(|p| p.matches(q)))
            .cloned()
            .collect())
    }

    async fn count_questions(&self) -> Result<i64, StoreError> {
        Ok(self.tables.read().await.questions.len() as i64)
    }

    async fn insert_question(&self, question: NewQuestion) -> Result<Question, StoreError> {
        let mut tables = self.tables.write().await;
        // Ids are never reused, matching a SERIAL column.
        tables.next_question_id += 1;
        let question = question.with_id(tables.next_question_id);
        tables.questions.insert(question.id, question.clone());
        Ok(question)
    }

    async fn delete_question(&self, id: i32) -> Result<(), StoreError> {
        self.tables
            .write()
            .await
            .questions
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound {
                resource: "question",
                id: id.to_string(),
            })
    }
}
