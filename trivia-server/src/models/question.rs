//! Question records

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{CategoryKey, ValidationError};

/// A row from the `questions` table.
///
/// Serialized as `{id, question, answer, category, difficulty}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub category: String,
    pub difficulty: i32,
}

/// Validated question awaiting an id from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    question: String,
    answer: String,
    category: CategoryKey,
    difficulty: i32,
}

impl NewQuestion {
    /// Create a new question, rejecting blank question or answer text.
    ///
    /// # Example
    /// ```
    /// use trivia_server::models::{CategoryKey, NewQuestion};
    ///
    /// let category = CategoryKey::from_id(2);
    /// assert!(NewQuestion::new("Who?", "Me", category.clone(), 1).is_ok());
    /// assert!(NewQuestion::new("  ", "Me", category, 1).is_err());
    /// ```
    pub fn new(
        question: &str,
        answer: &str,
        category: CategoryKey,
        difficulty: i32,
    ) -> Result<Self, ValidationError> {
        if question.trim().is_empty() {
            return Err(ValidationError::Empty { field: "question" });
        }
        if answer.trim().is_empty() {
            return Err(ValidationError::Empty { field: "answer" });
        }

        Ok(Self {
            question: question.to_owned(),
            answer: answer.to_owned(),
            category,
            difficulty,
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn category(&self) -> &CategoryKey {
        &self.category
    }

    pub fn difficulty(&self) -> i32 {
        self.difficulty
    }

    /// Attach the store-assigned id.
    pub fn with_id(self, id: i32) -> Question {
        Question {
            id,
            question: self.question,
            answer: self.answer,
            category: self.category.into_string(),
            difficulty: self.difficulty,
        }
    }
}
