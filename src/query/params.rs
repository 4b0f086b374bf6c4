use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Untrusted list-endpoint query parameters, shared by every resource.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(rename = "sortOrder")]
    pub sort_order: Option<String>,
    pub search: Option<String>,
    pub city: Option<String>,
    pub status: Option<String>,
}

impl ListParams {
    /// 1-based page number, floored to 1.
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(DEFAULT_PAGE).max(1)
    }

    /// Page size, clamped to [1, 100].
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Saturates instead of overflowing for absurd page numbers; an offset
    /// of `i64::MAX` is past any table's end and yields an empty page.
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }

    /// Anything other than `asc` sorts descending.
    pub fn order(&self) -> SortOrder {
        match self.sort_order.as_deref() {
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref().filter(|s| !s.is_empty())
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref().filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Pagination metadata returned alongside every list result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

impl PageMeta {
    pub fn new(total: i64, page: i64, limit: i64) -> Self {
        Self {
            total,
            page,
            limit,
            // ceil(total / limit); limit is always >= 1 here
            total_pages: (total + limit - 1) / limit,
        }
    }
}

/// A page of records plus its metadata: `{ meta, data }`.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub meta: PageMeta,
    pub data: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_defaults_and_floor() {
        let params = ListParams::default();
        assert_eq!(params.page(), 1);

        let params = ListParams {
            page: Some(0),
            ..Default::default()
        };
        assert_eq!(params.page(), 1);

        let params = ListParams {
            page: Some(-3),
            ..Default::default()
        };
        assert_eq!(params.page(), 1);

        let params = ListParams {
            page: Some(7),
            ..Default::default()
        };
        assert_eq!(params.page(), 7);
    }

    #[test]
    fn test_limit_defaults_and_clamp() {
        let params = ListParams::default();
        assert_eq!(params.limit(), 10);

        let params = ListParams {
            limit: Some(0),
            ..Default::default()
        };
        assert_eq!(params.limit(), 1);

        let params = ListParams {
            limit: Some(500),
            ..Default::default()
        };
        assert_eq!(params.limit(), 100);
    }

    #[test]
    fn test_offset() {
        let params = ListParams {
            page: Some(3),
            limit: Some(25),
            ..Default::default()
        };
        assert_eq!(params.offset(), 50);

        // Clamped page keeps the offset at zero
        let params = ListParams {
            page: Some(-1),
            ..Default::default()
        };
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_offset_saturates_on_huge_page() {
        let params = ListParams {
            page: Some(i64::MAX),
            limit: Some(100),
            ..Default::default()
        };
        assert_eq!(params.offset(), i64::MAX);

        let params = ListParams {
            page: Some(i64::MAX),
            limit: Some(1),
            ..Default::default()
        };
        assert_eq!(params.offset(), i64::MAX - 1);
    }

    #[test]
    fn test_sort_order_parsing() {
        let params = ListParams {
            sort_order: Some("asc".to_string()),
            ..Default::default()
        };
        assert_eq!(params.order(), SortOrder::Asc);

        for junk in [None, Some("desc"), Some("ASC"), Some("sideways")] {
            let params = ListParams {
                sort_order: junk.map(str::to_string),
                ..Default::default()
            };
            assert_eq!(params.order(), SortOrder::Desc);
        }
    }

    #[test]
    fn test_empty_filters_are_ignored() {
        let params = ListParams {
            search: Some(String::new()),
            city: Some(String::new()),
            status: Some(String::new()),
            ..Default::default()
        };
        assert!(params.search().is_none());
        assert!(params.city().is_none());
        assert!(params.status().is_none());
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(PageMeta::new(0, 1, 10).total_pages, 0);
        assert_eq!(PageMeta::new(1, 1, 10).total_pages, 1);
        assert_eq!(PageMeta::new(10, 1, 10).total_pages, 1);
        assert_eq!(PageMeta::new(11, 1, 10).total_pages, 2);
        assert_eq!(PageMeta::new(101, 1, 100).total_pages, 2);
    }
}
