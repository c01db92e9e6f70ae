//! Limit executor and page metadata.

use crate::executor::Relation;

/// Page metadata reported alongside a page of rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageInfo {
    /// Rows available before slicing.
    pub total_count: usize,
    /// 1-based page number, `skip / limit + 1`.
    pub page: usize,
    /// The requested `limit`.
    pub page_size: usize,
    /// `ceil(total_count / limit)`, or 0 for an empty input.
    pub total_pages: usize,
}

impl PageInfo {
    /// Computes page metadata. `limit` must be at least 1; the boundary
    /// rejects anything else before a query gets here.
    pub fn compute(total_count: usize, skip: usize, limit: usize) -> Self {
        debug_assert!(limit > 0, "limit must be positive");
        let limit = limit.max(1);
        let total_pages = if total_count > 0 {
            total_count.div_ceil(limit)
        } else {
            0
        };
        Self {
            total_count,
            page: skip / limit + 1,
            page_size: limit,
            total_pages,
        }
    }
}

/// Limit executor - applies OFFSET then LIMIT to a relation.
pub struct LimitExecutor {
    limit: usize,
    offset: usize,
}

impl LimitExecutor {
    /// Creates a new limit executor.
    pub fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// Executes the limit on the input relation, returning the page and its
    /// metadata. An offset past the end yields an empty page.
    pub fn execute<'a>(&self, mut input: Relation<'a>) -> (Relation<'a>, PageInfo) {
        let len = input.rows.len();
        let info = PageInfo::compute(len, self.offset, self.limit);
        let start = self.offset.min(len);
        let end = self.offset.saturating_add(self.limit).min(len);

        // Truncate tail first (drops elements after end)
        input.rows.truncate(end);
        // Remove head elements (drops elements before start)
        if start > 0 {
            input.rows.drain(..start);
        }
        (input, info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use tabula_core::{Row, Value};

    fn numbered(count: i64) -> Vec<Row> {
        (0..count).map(|i| Row::new(vec![Value::Int64(i)])).collect()
    }

    #[test]
    fn test_limit_executor() {
        let columns = vec![String::from("n")];
        let rows = numbered(10);
        let (page, info) = LimitExecutor::new(3, 2).execute(Relation::new(&columns, &rows));

        assert_eq!(page.len(), 3);
        assert_eq!(page.rows()[0].get(0), Some(&Value::Int64(2)));
        assert_eq!(page.rows()[2].get(0), Some(&Value::Int64(4)));
        assert_eq!(
            info,
            PageInfo {
                total_count: 10,
                page: 1,
                page_size: 3,
                total_pages: 4
            }
        );
    }

    #[test]
    fn test_limit_exceeds_size() {
        let columns = vec![String::from("n")];
        let rows = numbered(2);
        let (page, info) = LimitExecutor::new(100, 0).execute(Relation::new(&columns, &rows));
        assert_eq!(page.len(), 2);
        assert_eq!(info.total_pages, 1);
    }

    #[test]
    fn test_offset_exceeds_size() {
        let columns = vec![String::from("n")];
        let rows = numbered(2);
        let (page, info) = LimitExecutor::new(10, 100).execute(Relation::new(&columns, &rows));
        assert_eq!(page.len(), 0);
        assert_eq!(info.total_count, 2);
        assert_eq!(info.page, 11);
    }

    #[test]
    fn test_unaligned_skip_page_number() {
        // skip=15, limit=10 is "page 2" even though it starts mid-page.
        let info = PageInfo::compute(42, 15, 10);
        assert_eq!(info.page, 2);
        assert_eq!(info.total_pages, 5);
    }

    #[test]
    fn test_empty_input_has_no_pages() {
        let info = PageInfo::compute(0, 0, 10);
        assert_eq!(info.total_pages, 0);
        assert_eq!(info.page, 1);
    }

    #[test]
    fn test_huge_offset_does_not_overflow() {
        let columns = vec![String::from("n")];
        let rows = numbered(3);
        let (page, _) = LimitExecutor::new(100, usize::MAX).execute(Relation::new(&columns, &rows));
        assert!(page.is_empty());
    }
}
