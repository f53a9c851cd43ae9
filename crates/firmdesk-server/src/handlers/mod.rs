//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod catalog;
pub mod clients;
pub mod couriers;
pub mod export;
pub mod feedback;
pub mod health;
pub mod orders;
pub mod payments;
pub mod statuses;

use firmdesk_core::repository::{PaginatedResult, Pagination};
use serde::{Deserialize, Serialize};

/// `?offset=&limit=` query parameters for list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

impl ListQuery {
    pub(crate) fn pagination(&self) -> Pagination {
        let defaults = Pagination::default();
        Pagination {
            offset: self.offset.unwrap_or(defaults.offset),
            limit: self.limit.unwrap_or(defaults.limit),
        }
    }
}

/// Paginated JSON list body.
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

impl<T> From<PaginatedResult<T>> for ListResponse<T> {
    fn from(result: PaginatedResult<T>) -> Self {
        Self {
            items: result.items,
            total: result.total,
            offset: result.offset,
            limit: result.limit,
        }
    }
}
