//! Repository traits implemented on [`PgClient`] for accounts, events and
//! RSVPs.
//!
//! # Pagination
//!
//! Public discovery queries use the [`Pagination`] struct for bounded pages.
//! Owner-scoped listings (own events, own RSVPs) return every row and take
//! no pagination.
//!
//! [`PgClient`]: crate::PgClient

pub mod account;
pub mod event;
pub mod rsvp;

pub use account::AccountRepository;
pub use event::EventRepository;
pub use rsvp::RsvpRepository;
use serde::{Deserialize, Serialize};

/// Pagination parameters for database queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Maximum number of records to return.
    pub limit: i64,
    /// Number of records to skip.
    pub offset: i64,
}

impl Pagination {
    /// Creates a new pagination instance.
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            // Ensure limit is between 1 and 100
            limit: limit.clamp(1, 100),
            // Ensure offset is non-negative
            offset: offset.max(0),
        }
    }

    /// Creates pagination from page number and page size.
    pub fn from_page(page: i64, page_size: i64) -> Self {
        let page = page.max(1);
        let page_size = page_size.clamp(1, 100);
        Self::new(page_size, (page - 1) * page_size)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(10, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_new() {
        let pagination = Pagination::new(25, 100);
        assert_eq!(pagination.limit, 25);
        assert_eq!(pagination.offset, 100);
    }

    #[test]
    fn pagination_bounds_checking() {
        let pagination = Pagination::new(0, 10);
        assert_eq!(pagination.limit, 1);

        let pagination = Pagination::new(1500, 10);
        assert_eq!(pagination.limit, 100);

        let pagination = Pagination::new(10, -5);
        assert_eq!(pagination.offset, 0);
    }

    #[test]
    fn pagination_from_page() {
        let pagination = Pagination::from_page(1, 20);
        assert_eq!(pagination.limit, 20);
        assert_eq!(pagination.offset, 0);

        let pagination = Pagination::from_page(3, 10);
        assert_eq!(pagination.limit, 10);
        assert_eq!(pagination.offset, 20);

        let pagination = Pagination::from_page(0, 20);
        assert_eq!(pagination.offset, 0);
    }

    #[test]
    fn pagination_defaults() {
        let pagination = Pagination::default();
        assert_eq!(pagination.limit, 10);
        assert_eq!(pagination.offset, 0);
    }
}
