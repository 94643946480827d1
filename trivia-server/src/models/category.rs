//! Category records and the category key used by questions
//!
//! Questions store their category as text. Clients send it either as a
//! JSON string (`"2"`) or a JSON integer (`2`); both normalize to the
//! decimal string through [`CategoryKey`].

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// A row from the `categories` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i32,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

impl Category {
    pub fn new(id: i32, kind: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
        }
    }

    /// Key that questions belonging to this category carry.
    pub fn key(&self) -> CategoryKey {
        CategoryKey::from_id(i64::from(self.id))
    }
}

/// Normalized category reference (decimal string of a category id)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CategoryKey(String);

impl CategoryKey {
    pub fn from_id(id: i64) -> Self {
        Self(id.to_string())
    }

    /// Parse a textual category reference.
    ///
    /// Surrounding whitespace is ignored; the remainder must be an integer.
    /// Leading zeros and `+` signs are normalized away.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "category" });
        }

        trimmed
            .parse::<i64>()
            .map(Self::from_id)
            .map_err(|_| ValidationError::InvalidFormat {
                field: "category",
                reason: "must be an integer category id",
            })
    }

    /// True for the "all categories" sentinel used by quizzes.
    pub fn is_all(&self) -> bool {
        self.0 == "0"
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CategoryKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawKey {
    Int(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for CategoryKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawKey::deserialize(deserializer)? {
            RawKey::Int(id) => Ok(Self::from_id(id)),
            RawKey::Text(s) => Self::parse(&s).map_err(serde::de::Error::custom),
        }
    }
}

impl Serialize for CategoryKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}
