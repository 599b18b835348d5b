//! Data models representing database entities.
//!
//! This module contains all data structures that map to database tables,
//! plus the request/response types exchanged with API clients.

/// Category model
pub mod categoria;
/// Financial account model
pub mod conta;
/// Transaction model and balance-delta rules
pub mod transacao;
/// User model
pub mod usuario;

use serde::Deserialize;

/// Pagination query parameters shared by list endpoints.
///
/// # Defaults
///
/// - `page`: 1
/// - `limit`: 10, clamped to at most 100
///
/// Offset is computed as `(page - 1) * limit`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Paginacao {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl Paginacao {
    const LIMIT_PADRAO: i64 = 10;
    const LIMIT_MAXIMO: i64 = 100;

    /// Effective page, never below 1.
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Effective page size, clamped to `1..=100`.
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(Self::LIMIT_PADRAO)
            .clamp(1, Self::LIMIT_MAXIMO)
    }

    /// Rows skipped before the requested page.
    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }
}

#[cfg(test)]
mod tests {
    use super::Paginacao;
    use rstest::rstest;

    #[rstest]
    #[case(None, None, 1, 10, 0)]
    #[case(Some(1), Some(10), 1, 10, 0)]
    #[case(Some(3), Some(10), 3, 10, 20)]
    #[case(Some(2), Some(25), 2, 25, 25)]
    // Out-of-range values are clamped, never an error
    #[case(Some(0), Some(0), 1, 1, 0)]
    #[case(Some(-5), Some(1000), 1, 100, 0)]
    fn pagination_defaults_and_clamps(
        #[case] page: Option<i64>,
        #[case] limit: Option<i64>,
        #[case] expected_page: i64,
        #[case] expected_limit: i64,
        #[case] expected_offset: i64,
    ) {
        let p = Paginacao { page, limit };
        assert_eq!(p.page(), expected_page);
        assert_eq!(p.limit(), expected_limit);
        assert_eq!(p.offset(), expected_offset);
    }
}
