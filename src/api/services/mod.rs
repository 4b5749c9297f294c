//! Business logic behind the HTTP handlers.

pub mod auth;
pub mod catalog;
pub mod ticket_categories;
pub mod tickets;

use serde::Deserialize;

const DEFAULT_PAGE_LIMIT: u64 = 100;
const MAX_PAGE_LIMIT: u64 = 1000;

/// Offset pagination query shared by all list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

impl PageQuery {
    pub fn skip(&self) -> u64 {
        self.skip.unwrap_or(0)
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(DEFAULT_PAGE_LIMIT).min(MAX_PAGE_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_query_defaults() {
        let query = PageQuery::default();
        assert_eq!(query.skip(), 0);
        assert_eq!(query.limit(), 100);
    }

    #[test]
    fn page_query_caps_limit() {
        let query = PageQuery {
            skip: Some(10),
            limit: Some(50_000),
        };
        assert_eq!(query.skip(), 10);
        assert_eq!(query.limit(), 1000);
    }
}
