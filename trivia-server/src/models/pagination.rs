//! Pagination over fully materialized result sets

use serde::Deserialize;

/// Questions per page
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed; values below 1 select nothing)
    pub page: i64,
    /// Items per page
    pub per_page: usize,
}

impl Pagination {
    pub fn new(page: i64, per_page: usize) -> Self {
        Self { page, per_page }
    }

    /// Start index of the window, or None when the page precedes the first.
    pub fn offset(&self) -> Option<usize> {
        let index = usize::try_from(self.page.checked_sub(1)?).ok()?;
        index.checked_mul(self.per_page)
    }

    /// Slice the page window `[(page-1)*per_page, page*per_page)` out of
    /// `items`. Out-of-range pages yield an empty vec.
    pub fn slice<T: Clone>(&self, items: &[T]) -> Vec<T> {
        let Some(start) = self.offset() else {
            return Vec::new();
        };
        if start >= items.len() {
            return Vec::new();
        }
        let end = start.saturating_add(self.per_page).min(items.len());
        items[start..end].to_vec()
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: QUESTIONS_PER_PAGE,
        }
    }
}

/// `?page=` query parameter.
///
/// Kept as raw text so a malformed value falls back to page 1 instead of
/// rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl From<PageQuery> for Pagination {
    fn from(query: PageQuery) -> Self {
        let page = query
            .page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(1);
        Self::new(page, QUESTIONS_PER_PAGE)
    }
}
