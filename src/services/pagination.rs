use pushkind_common::pagination::Pagination;
use serde::Deserialize;

use crate::services::{ServiceError, ServiceResult};

/// Page size used when the client does not ask for one.
pub const DEFAULT_PAGE_SIZE: usize = 10;
/// Largest page size a client may request.
pub const MAX_PAGE_SIZE: usize = 100;
/// Page size of the notification and update feeds.
pub const FEED_PAGE_SIZE: usize = 8;

const INVALID_PAGE: &str = "Invalid page.";

/// Raw `page` / `page_size` query parameters.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub page_size: Option<String>,
}

impl PageParams {
    /// Resolves the requested page. A page that is not a positive integer is
    /// reported as NotFound; an unusable page size falls back to the default.
    pub fn pagination(&self, default_size: usize) -> ServiceResult<Pagination> {
        let page = match self.page.as_deref().map(str::trim) {
            None | Some("") => 1,
            Some(raw) => match raw.parse::<usize>() {
                Ok(page) if page >= 1 => page,
                _ => return Err(ServiceError::NotFound(INVALID_PAGE.to_string())),
            },
        };

        let per_page = self
            .page_size
            .as_deref()
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|size| *size > 0)
            .map_or(default_size, |size| size.min(MAX_PAGE_SIZE));

        // The row offset of the page has to fit an SQL OFFSET.
        let offset_fits = (page - 1)
            .checked_mul(per_page)
            .and_then(|offset| i64::try_from(offset).ok())
            .is_some();
        if !offset_fits {
            return Err(ServiceError::NotFound(INVALID_PAGE.to_string()));
        }

        Ok(Pagination { page, per_page })
    }
}

/// One page of a counted result.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Number of records across all pages.
    pub count: usize,
    pub page: usize,
    pub per_page: usize,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Pages past the last non-empty one do not exist; page 1 always does.
    pub fn new(count: usize, pagination: &Pagination, results: Vec<T>) -> ServiceResult<Self> {
        let offset = pagination
            .page
            .saturating_sub(1)
            .saturating_mul(pagination.per_page);
        if pagination.page > 1 && offset >= count {
            return Err(ServiceError::NotFound(INVALID_PAGE.to_string()));
        }

        Ok(Self {
            count,
            page: pagination.page,
            per_page: pagination.per_page,
            results,
        })
    }

    pub fn has_next(&self) -> bool {
        self.page.saturating_mul(self.per_page) < self.count
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            count: self.count,
            page: self.page,
            per_page: self.per_page,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<&str>, page_size: Option<&str>) -> PageParams {
        PageParams {
            page: page.map(str::to_string),
            page_size: page_size.map(str::to_string),
        }
    }

    #[test]
    fn defaults_to_first_page_of_default_size() {
        let pagination = params(None, None).pagination(DEFAULT_PAGE_SIZE);
        match pagination {
            Ok(pagination) => {
                assert_eq!(pagination.page, 1);
                assert_eq!(pagination.per_page, DEFAULT_PAGE_SIZE);
            }
            Err(err) => panic!("unexpected error: {err}"),
        }
    }

    #[test]
    fn page_size_is_capped() {
        match params(Some("2"), Some("1000")).pagination(DEFAULT_PAGE_SIZE) {
            Ok(pagination) => {
                assert_eq!(pagination.page, 2);
                assert_eq!(pagination.per_page, MAX_PAGE_SIZE);
            }
            Err(err) => panic!("unexpected error: {err}"),
        }
    }

    #[test]
    fn bad_page_size_falls_back_to_default() {
        match params(None, Some("lots")).pagination(FEED_PAGE_SIZE) {
            Ok(pagination) => assert_eq!(pagination.per_page, FEED_PAGE_SIZE),
            Err(err) => panic!("unexpected error: {err}"),
        }
    }

    #[test]
    fn non_numeric_page_is_not_found() {
        let result = params(Some("abc"), None).pagination(DEFAULT_PAGE_SIZE);
        assert!(matches!(result, Err(ServiceError::NotFound(message)) if message == INVALID_PAGE));

        let result = params(Some("0"), None).pagination(DEFAULT_PAGE_SIZE);
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn page_with_unrepresentable_offset_is_not_found() {
        let result = params(Some("1000000000000000000"), Some("100")).pagination(DEFAULT_PAGE_SIZE);
        assert!(matches!(result, Err(ServiceError::NotFound(message)) if message == INVALID_PAGE));

        let result = params(Some("100000000000000000"), Some("100")).pagination(DEFAULT_PAGE_SIZE);
        assert!(matches!(result, Err(ServiceError::NotFound(_))));

        let result = params(Some("99999999999999999999999"), None).pagination(DEFAULT_PAGE_SIZE);
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn huge_page_does_not_overflow_page_bounds() {
        let pagination = Pagination {
            page: usize::MAX,
            per_page: MAX_PAGE_SIZE,
        };
        assert!(Page::new(5, &pagination, Vec::<i32>::new()).is_err());

        let page = Page {
            count: 5,
            page: usize::MAX,
            per_page: MAX_PAGE_SIZE,
            results: Vec::<i32>::new(),
        };
        assert!(!page.has_next());
    }

    #[test]
    fn page_past_the_end_is_not_found() {
        let pagination = Pagination {
            page: 3,
            per_page: 10,
        };
        assert!(Page::new(20, &pagination, Vec::<i32>::new()).is_err());

        let pagination = Pagination {
            page: 1,
            per_page: 10,
        };
        match Page::new(0, &pagination, Vec::<i32>::new()) {
            Ok(page) => {
                assert!(!page.has_next());
                assert!(!page.has_previous());
            }
            Err(err) => panic!("empty first page must exist: {err}"),
        }
    }
}
