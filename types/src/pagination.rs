use serde::{Deserialize, Serialize};

/// Where a page sits in the full result set.
///
/// Always derived from `(page, limit, total)`, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationInfo {
    /// `limit` must be at least 1, a zero limit is treated as 1.
    #[must_use]
    pub const fn new(page: u64, limit: u64, total: u64) -> Self {
        let limit = if limit == 0 { 1 } else { limit };
        let total_pages = total.div_ceil(limit);
        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// How many records precede this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::empty(1, 10, 0, 0, false, false)]
    #[case::single_partial_page(1, 10, 3, 1, false, false)]
    #[case::exact_fit(1, 10, 10, 1, false, false)]
    #[case::first_of_many(1, 10, 25, 3, true, false)]
    #[case::middle(2, 10, 25, 3, true, true)]
    #[case::last(3, 10, 25, 3, false, true)]
    #[case::past_the_end(7, 5, 12, 3, false, true)]
    #[case::limit_of_one(4, 1, 4, 4, false, true)]
    #[case::past_the_end_of_nothing(2, 10, 0, 0, false, true)]
    fn test_pagination_info(
        #[case] page: u64,
        #[case] limit: u64,
        #[case] total: u64,
        #[case] total_pages: u64,
        #[case] has_next: bool,
        #[case] has_prev: bool,
    ) {
        let info = PaginationInfo::new(page, limit, total);
        assert_eq!(
            info,
            PaginationInfo {
                page,
                limit,
                total,
                total_pages,
                has_next,
                has_prev,
            }
        );
    }

    #[rstest]
    #[case(1, 10, 0)]
    #[case(2, 10, 10)]
    #[case(3, 5, 10)]
    #[case(0, 5, 0)]
    fn test_offset(#[case] page: u64, #[case] limit: u64, #[case] expected: u64) {
        assert_eq!(PaginationInfo::new(page, limit, 100).offset(), expected);
    }

    #[test]
    fn test_zero_limit_does_not_divide_by_zero() {
        let info = PaginationInfo::new(1, 0, 5);
        assert_eq!(info.limit, 1);
        assert_eq!(info.total_pages, 5);
    }

    #[test]
    fn test_wire_names() {
        let value = serde_json::to_value(PaginationInfo::new(1, 10, 11)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "page": 1,
                "limit": 10,
                "total": 11,
                "totalPages": 2,
                "hasNext": true,
                "hasPrev": false,
            })
        );
    }
}
