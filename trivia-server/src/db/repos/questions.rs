//! Question repository
//!
//! Filters are assembled with `QueryBuilder`; every value is bound.

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::{NewQuestion, Question};
use crate::store::{Predicate, StoreError};

const SELECT_QUESTIONS: &str = "SELECT id, question, answer, category, difficulty FROM questions";

/// Question repository
pub struct QuestionRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> QuestionRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a question, returning the stored row with its new id.
    pub async fn create(&self, question: NewQuestion) -> Result<Question, StoreError> {
        let row = sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (question, answer, category, difficulty)
            VALUES ($1, $2, $3, $4)
            RETURNING id, question, answer, category, difficulty
            "#,
        )
        .bind(question.question())
        .bind(question.answer())
        .bind(question.category().as_str())
        .bind(question.difficulty())
        .fetch_one(self.pool)
        .await?;

        tracing::debug!(id = row.id, "question inserted");
        Ok(row)
    }

    pub async fn get(&self, id: i32) -> Result<Option<Question>, StoreError> {
        let row = sqlx::query_as::<_, Question>(&format!("{SELECT_QUESTIONS} WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row)
    }

    /// Questions matching every predicate, ordered by id.
    pub async fn filter(&self, predicates: &[Predicate]) -> Result<Vec<Question>, StoreError> {
        let mut query = QueryBuilder::<Postgres>::new(SELECT_QUESTIONS);
        push_predicates(&mut query, predicates);
        query.push(" ORDER BY id");

        let rows = query
            .build_query_as::<Question>()
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM questions")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Delete by id; `NotFound` when nothing was removed.
    pub async fn delete(&self, id: i32) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                resource: "question",
                id: id.to_string(),
            });
        }

        Ok(())
    }
}

fn push_predicates(query: &mut QueryBuilder<'_, Postgres>, predicates: &[Predicate]) {
    for (i, predicate) in predicates.iter().enumerate() {
        query.push(if i == 0 { " WHERE " } else { " AND " });
        match predicate {
            Predicate::QuestionEquals(text) => {
                query.push("question = ").push_bind(text.clone());
            }
            Predicate::QuestionContains(term) => {
                query.push("question ILIKE ").push_bind(like_pattern(term));
            }
            Predicate::CategoryEquals(key) => {
                query.push("category = ").push_bind(key.as_str().to_owned());
            }
            Predicate::IdNotIn(ids) => {
                query.push("id <> ALL(").push_bind(ids.clone()).push(")");
            }
        }
    }
}

/// `%term%` with LIKE metacharacters escaped so the term matches literally.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
