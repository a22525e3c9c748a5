//! # Query Engine Module
//!
//! Search, sort and pagination primitives shared by every list operation.
//!
//! ## The Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      List Query Pipeline                                │
//! │                                                                         │
//! │  full collection                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. FILTER: search (case-insensitive, per-entity fields)               │
//! │             AND equality filters AND range filters                     │
//! │     Each filter is an independent predicate; intersection is           │
//! │     order-independent by construction.                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. SORT: optional field + direction, STABLE                           │
//! │     No sort field → insertion order preserved                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. PAGINATE: slice [(page-1)*limit, page*limit)                       │
//! │     metadata: {page, limit, total, totalPages}                         │
//! │     total counts the FILTERED set, before slicing                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The per-entity query structs (`ListCustomersQuery`, `ListProductsQuery`,
//! `ListSalesQuery`) live next to their entities in [`crate::types`] and
//! drive this pipeline through their `apply` methods.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use ts_rs::TS;

use crate::{DEFAULT_PAGE, DEFAULT_PAGE_LIMIT};

// =============================================================================
// Sort Direction
// =============================================================================

/// Direction of a sort: ascending (default) or descending.
///
/// Wire values are `"asc"` / `"desc"`, matching the query parameters the UI
/// sends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Applies the direction to an ascending comparison result.
    ///
    /// ## Example
    /// ```rust
    /// use std::cmp::Ordering;
    /// use balcao_core::query::SortDirection;
    ///
    /// assert_eq!(SortDirection::Asc.apply(Ordering::Less), Ordering::Less);
    /// assert_eq!(SortDirection::Desc.apply(Ordering::Less), Ordering::Greater);
    /// assert_eq!(SortDirection::Desc.apply(Ordering::Equal), Ordering::Equal);
    /// ```
    #[inline]
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// Pagination metadata returned with every list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Pagination {
    /// 1-based page number that was served.
    pub page: u32,

    /// Requested page size.
    pub limit: u32,

    /// Size of the filtered set, counted before slicing.
    pub total: usize,

    /// `ceil(total / limit)`.
    pub total_pages: usize,
}

/// One page of results plus its pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

/// Slices a (filtered, sorted) collection into one page.
///
/// `page`/`limit` default to 1/10; zero values fall back to the defaults the
/// same way the UI's empty query parameters do.
///
/// ## Example
/// ```rust
/// use balcao_core::query::paginate;
///
/// let page = paginate(vec![1, 2, 3, 4, 5], Some(2), Some(2));
/// assert_eq!(page.data, vec![3, 4]);
/// assert_eq!(page.pagination.total, 5);
/// assert_eq!(page.pagination.total_pages, 3);
/// ```
pub fn paginate<T>(items: Vec<T>, page: Option<u32>, limit: Option<u32>) -> PaginatedResponse<T> {
    let page = match page {
        Some(p) if p > 0 => p,
        _ => DEFAULT_PAGE,
    };
    let limit = match limit {
        Some(l) if l > 0 => l,
        _ => DEFAULT_PAGE_LIMIT,
    };

    let total = items.len();
    let total_pages = total.div_ceil(limit as usize);

    let start = (page as usize - 1) * limit as usize;
    let data: Vec<T> = items.into_iter().skip(start).take(limit as usize).collect();

    PaginatedResponse {
        data,
        pagination: Pagination {
            page,
            limit,
            total,
            total_pages,
        },
    }
}

// =============================================================================
// Search & Comparison Helpers
// =============================================================================

/// Case-insensitive containment test across an entity's searchable fields.
///
/// Absent optional fields never match. Matching is substring-based, exactly
/// what the UI's search box expects.
///
/// ## Example
/// ```rust
/// use balcao_core::query::matches_search;
///
/// let email = Some("joao@example.com");
/// assert!(matches_search([Some("João Silva"), email], "silva"));
/// assert!(matches_search([Some("João Silva"), email], "EXAMPLE.COM"));
/// assert!(!matches_search([Some("João Silva"), None], "example"));
/// ```
pub fn matches_search<'a, I>(fields: I, search: &str) -> bool
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let needle = search.to_lowercase();
    fields
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Case-insensitive ordering for string sort keys.
///
/// The UI presents sorted columns case-insensitively ("ana" between "Alberto"
/// and "Bruno"), so byte order would surprise users.
#[inline]
pub fn cmp_ci(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Like [`cmp_ci`], for optional fields.
///
/// Absent values sort first. This keeps the comparator a total order, which
/// a stable sort requires (treating "missing" as equal-to-everything would
/// not be transitive).
pub fn cmp_ci_opt(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => cmp_ci(x, y),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_slices_correctly() {
        let page = paginate(vec!["a", "b", "c", "d", "e"], Some(2), Some(2));
        assert_eq!(page.data, vec!["c", "d"]);
        assert_eq!(page.pagination.page, 2);
        assert_eq!(page.pagination.limit, 2);
        assert_eq!(page.pagination.total, 5);
        assert_eq!(page.pagination.total_pages, 3);
    }

    #[test]
    fn test_paginate_defaults() {
        let items: Vec<i32> = (1..=25).collect();
        let page = paginate(items, None, None);
        assert_eq!(page.data.len(), 10);
        assert_eq!(page.data[0], 1);
        assert_eq!(page.pagination.page, 1);
        assert_eq!(page.pagination.limit, 10);
        assert_eq!(page.pagination.total, 25);
        assert_eq!(page.pagination.total_pages, 3);
    }

    #[test]
    fn test_paginate_zero_falls_back_to_defaults() {
        let items: Vec<i32> = (1..=5).collect();
        let page = paginate(items, Some(0), Some(0));
        assert_eq!(page.pagination.page, 1);
        assert_eq!(page.pagination.limit, 10);
        assert_eq!(page.data.len(), 5);
    }

    #[test]
    fn test_paginate_past_the_end_is_empty() {
        let page = paginate(vec![1, 2, 3], Some(5), Some(10));
        assert!(page.data.is_empty());
        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.pagination.total_pages, 1);
    }

    #[test]
    fn test_paginate_empty_collection() {
        let page = paginate(Vec::<i32>::new(), None, None);
        assert!(page.data.is_empty());
        assert_eq!(page.pagination.total, 0);
        assert_eq!(page.pagination.total_pages, 0);
    }

    #[test]
    fn test_matches_search_is_case_insensitive() {
        let fields = [Some("Notebook Dell XPS 13"), Some("NOT001")];
        assert!(matches_search(fields, "dell"));
        assert!(matches_search(fields, "not001"));
        assert!(matches_search(fields, "XPS"));
        assert!(!matches_search(fields, "lenovo"));
    }

    #[test]
    fn test_matches_search_skips_absent_fields() {
        assert!(!matches_search([None, None], "anything"));
        assert!(matches_search([None, Some("Monitor LG")], "lg"));
    }

    #[test]
    fn test_sort_direction_apply() {
        assert_eq!(SortDirection::Asc.apply(Ordering::Greater), Ordering::Greater);
        assert_eq!(SortDirection::Desc.apply(Ordering::Greater), Ordering::Less);
        assert_eq!(SortDirection::Desc.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn test_cmp_ci() {
        assert_eq!(cmp_ci("ana", "Bruno"), Ordering::Less);
        assert_eq!(cmp_ci("ZEBRA", "abelha"), Ordering::Greater);
        assert_eq!(cmp_ci("Mesmo", "mesmo"), Ordering::Equal);
    }

    #[test]
    fn test_default_direction_is_asc() {
        assert_eq!(SortDirection::default(), SortDirection::Asc);
    }

    #[test]
    fn test_cmp_ci_opt_sorts_absent_first() {
        assert_eq!(cmp_ci_opt(None, Some("ana")), Ordering::Less);
        assert_eq!(cmp_ci_opt(Some("ana"), None), Ordering::Greater);
        assert_eq!(cmp_ci_opt(None, None), Ordering::Equal);
        assert_eq!(cmp_ci_opt(Some("Bruno"), Some("ana")), Ordering::Greater);
    }
}
