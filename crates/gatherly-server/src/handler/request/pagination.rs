//! Page-based pagination request parameters.

use gatherly_postgres::query::Pagination as QueryPagination;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Page-based pagination parameters.
///
/// Pages are one-based. Limits are capped to keep listing queries cheap.
#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct Pagination {
    /// One-based page number.
    #[validate(range(min = 1, max = 10000))]
    pub page: Option<u32>,

    /// Maximum number of records to return per page.
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u32>,
}

impl Pagination {
    /// Default page size.
    const DEFAULT_LIMIT: u32 = 10;
    /// Default page number.
    const DEFAULT_PAGE: u32 = 1;

    /// Returns a new [`Pagination`].
    #[inline]
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    /// Returns the requested page number.
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(Self::DEFAULT_PAGE)
    }

    /// Returns the requested page size.
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT)
    }
}

impl From<Pagination> for QueryPagination {
    fn from(pagination: Pagination) -> Self {
        Self::from_page(pagination.page() as i64, pagination.limit() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page() {
        let pagination = Pagination::default();
        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.limit(), 10);
    }

    #[test]
    fn converts_to_query_offsets() {
        let query: QueryPagination = Pagination::new(3, 20).into();
        assert_eq!(query.limit, 20);
        assert_eq!(query.offset, 40);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let pagination = Pagination::new(0, 10);
        assert!(pagination.validate().is_err());

        let pagination = Pagination::new(1, 500);
        assert!(pagination.validate().is_err());
    }
}
