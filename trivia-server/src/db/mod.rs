//! Database layer - connection pool, schema and repositories
//!
//! - Connection pool (default 5 connections) shared through `PgStore`
//! - One statement per store call; no transactions span requests
//! - Only bound parameters reach SQL, including dynamic filters

pub mod migrations;
pub mod pool;
pub mod repos;

use async_trait::async_trait;
pub use sqlx::PgPool;

use crate::models::{Category, NewQuestion, Question};
use crate::store::{Predicate, StoreError, TriviaStore};

pub use pool::{create_pool, create_pool_with_options};
pub use repos::{CategoryRepo, QuestionRepo};

/// Postgres-backed [`TriviaStore`].
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl TriviaStore for PgStore {
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        CategoryRepo::new(&self.pool).list().await
    }

    async fn find_category(&self, id: i32) -> Result<Option<Category>, StoreError> {
        CategoryRepo::new(&self.pool).get(id).await
    }

    async fn list_questions(&self) -> Result<Vec<Question>, StoreError> {
        QuestionRepo::new(&self.pool).filter(&[]).await
    }

    async fn find_question(&self, id: i32) -> Result<Option<Question>, StoreError> {
        QuestionRepo::new(&self.pool).get(id).await
    }

    async fn filter_questions(&self, predicates: &[Predicate]) -> Result<Vec<Question>, StoreError> {
        QuestionRepo::new(&self.pool).filter(predicates).await
    }

    async fn count_questions(&self) -> Result<i64, StoreError> {
        QuestionRepo::new(&self.pool).count().await
    }

    async fn insert_question(&self, question: NewQuestion) -> Result<Question, StoreError> {
        QuestionRepo::new(&self.pool).create(question).await
    }

    async fn delete_question(&self, id: i32) -> Result<(), StoreError> {
        QuestionRepo::new(&self.pool).delete(id).await
    }
}
