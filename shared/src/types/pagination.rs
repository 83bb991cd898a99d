//! Pagination related types for list endpoints

use serde::{Deserialize, Serialize};

use crate::errors::ApiError;
use crate::utils::validation::require_pagination;

pub const DEFAULT_PAGE: u32 = 1;
pub const MAX_LIMIT: u32 = 100;

/// Validated pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub page: u32,

    /// Number of items per page
    pub limit: u32,
}

impl Pagination {
    /// Build pagination after checking the bounds
    pub fn new(page: u32, limit: u32) -> Result<Self, ApiError> {
        require_pagination(i64::from(page), i64::from(limit))?;
        Ok(Self { page, limit })
    }

    /// First page with the given page size
    pub fn first(limit: u32) -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    /// Calculate the offset for database queries
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    /// Calculate offset as i64 for SQL queries
    pub fn offset_i64(&self) -> i64 {
        self.offset() as i64
    }

    /// Calculate limit as i64 for SQL queries
    pub fn limit_i64(&self) -> i64 {
        i64::from(self.limit)
    }

    /// Pagination metadata for a page of this shape
    pub fn meta(&self, total: u64) -> PaginationMeta {
        PaginationMeta::new(self.page, self.limit, total)
    }
}

/// Raw `?page=&limit=` query values, kept as strings so a malformed value
/// becomes a validation error naming the parameter instead of an extractor failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PageQuery {
    pub fn resolve(&self, default_limit: u32) -> Result<Pagination, ApiError> {
        let page = parse_param("page", self.page.as_deref(), i64::from(DEFAULT_PAGE))?;
        let limit = parse_param("limit", self.limit.as_deref(), i64::from(default_limit))?;
        require_pagination(page, limit)?;

        Ok(Pagination {
            page: narrow("page", page)?,
            limit: narrow("limit", limit)?,
        })
    }
}

/// Bounds were checked as i64; a value past `u32::MAX` is still out of range
fn narrow(name: &str, value: i64) -> Result<u32, ApiError> {
    u32::try_from(value).map_err(|_| {
        ApiError::validation(format!("{name} must be at most {}", u32::MAX))
            .with_detail("field", name)
            .with_detail("value", value)
    })
}

fn parse_param(name: &str, raw: Option<&str>, default: i64) -> Result<i64, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value.parse::<i64>().map_err(|_| {
            ApiError::validation(format!("{name} must be an integer"))
                .with_detail("field", name)
                .with_detail("value", value)
        }),
    }
}

/// Pagination metadata attached to list envelopes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let pages = if total == 0 || limit == 0 {
            0
        } else {
            total.div_ceil(u64::from(limit))
        };

        Self {
            page,
            limit,
            total,
            pages,
            has_next: u64::from(page) < pages,
            has_prev: page > 1,
        }
    }
}

/// One page of results plus its metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, pagination: &Pagination, total: u64) -> Self {
        Self {
            items,
            meta: pagination.meta(total),
        }
    }

    /// Transform the items, keeping the metadata
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn test_meta_partial_last_page() {
        let meta = PaginationMeta::new(5, 20, 95);
        assert_eq!(meta.pages, 5);
        assert!(!meta.has_next);
        assert!(meta.has_prev);
    }

    #[test]
    fn test_meta_empty_total() {
        let meta = PaginationMeta::new(1, 20, 0);
        assert_eq!(meta.pages, 0);
        assert!(!meta.has_next);
        assert!(!meta.has_prev);
    }

    #[test]
    fn test_meta_exact_multiple() {
        let meta = PaginationMeta::new(1, 25, 100);
        assert_eq!(meta.pages, 4);
        assert!(meta.has_next);
    }

    #[test]
    fn test_offset() {
        let pagination = Pagination::new(3, 20).unwrap();
        assert_eq!(pagination.offset(), 40);
        assert_eq!(pagination.limit_i64(), 20);
    }

    #[test]
    fn test_query_defaults() {
        let pagination = PageQuery::default().resolve(50).unwrap();
        assert_eq!(pagination, Pagination { page: 1, limit: 50 });
    }

    #[test]
    fn test_query_parses_values() {
        let query = PageQuery {
            page: Some("2".into()),
            limit: Some(" 10 ".into()),
        };
        assert_eq!(query.resolve(20).unwrap(), Pagination { page: 2, limit: 10 });
    }

    #[test]
    fn test_query_rejects_page_past_u32() {
        let query = PageQuery {
            page: Some("4294967297".into()),
            limit: None,
        };
        let err = query.resolve(20).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.message(), "page must be at most 4294967295");
        assert_eq!(err.details().unwrap()["field"], "page");

        let query = PageQuery {
            page: Some("4294967295".into()),
            limit: None,
        };
        assert_eq!(query.resolve(20).unwrap().page, u32::MAX);
    }

    #[test]
    fn test_query_rejects_non_integer() {
        let query = PageQuery {
            page: Some("two".into()),
            limit: None,
        };
        let err = query.resolve(20).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.message().contains("page"));
    }

    #[test]
    fn test_query_rejects_out_of_range_limit() {
        let query = PageQuery {
            page: None,
            limit: Some("101".into()),
        };
        let err = query.resolve(20).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.message().contains("100"));
    }
}
