//! Domain models with validation at construction
//!
//! Request payloads are checked when converted into these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod category;
pub mod question;
pub mod pagination;

pub use validation::ValidationError;
pub use category::{Category, CategoryKey};
pub use question::{NewQuestion, Question};
pub use pagination::{PageQuery, Pagination, QUESTIONS_PER_PAGE};
