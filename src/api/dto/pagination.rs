//! Paging query parameters and paginated responses.

use crate::domain::query::{Page, PageRequest};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_with::{DisplayFromStr, serde_as};
use thiserror::Error;

pub const MIN_PAGE_SIZE: u32 = 1;
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Paging query parameters: `page` (0-based) and `size`.
///
/// Uses `serde_with` to parse numbers from query strings, which is required
/// once these params are `#[serde(flatten)]`-ed into a filter struct.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub size: Option<u32>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageParamsError {
    #[error("Page size must be between {min} and {max}, got {got}")]
    SizeOutOfRange { min: u32, max: u32, got: u32 },
}

impl From<PageParamsError> for AppError {
    fn from(e: PageParamsError) -> Self {
        let message = e.to_string();
        match e {
            PageParamsError::SizeOutOfRange { min, max, got } => {
                AppError::bad_request(message, json!({"min": min, "max": max, "size": got}))
            }
        }
    }
}

impl PageParams {
    /// Validates the parameters and converts them to a [`PageRequest`].
    ///
    /// # Defaults
    ///
    /// - `page`: 0
    /// - `size`: 20
    pub fn to_page_request(&self) -> Result<PageRequest, PageParamsError> {
        let page = self.page.unwrap_or(0);
        let size = self.size.unwrap_or(PageRequest::DEFAULT_SIZE);

        if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&size) {
            return Err(PageParamsError::SizeOutOfRange {
                min: MIN_PAGE_SIZE,
                max: MAX_PAGE_SIZE,
                got: size,
            });
        }

        Ok(PageRequest::new(page, size))
    }
}

/// Paginated list of items.
#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata for responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u32,
    pub size: u32,
    pub total_elements: i64,
    pub total_pages: u32,
}

impl<T, E> From<Page<E>> for PageResponse<T>
where
    T: From<E>,
{
    fn from(page: Page<E>) -> Self {
        let pagination = PaginationMeta {
            page: page.page,
            size: page.size,
            total_elements: page.total_elements,
            total_pages: page.total_pages(),
        };

        Self {
            content: page.content.into_iter().map(T::from).collect(),
            pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<u32>, size: Option<u32>) -> PageParams {
        PageParams { page, size }
    }

    #[test]
    fn test_defaults() {
        let request = params(None, None).to_page_request().unwrap();
        assert_eq!(request, PageRequest::new(0, 20));
    }

    #[test]
    fn test_custom_page_and_size() {
        let request = params(Some(2), Some(100)).to_page_request().unwrap();
        assert_eq!(request.offset(), 200);
        assert_eq!(request.limit(), 100);
    }

    #[test]
    fn test_size_zero_is_error() {
        assert_eq!(
            params(None, Some(0)).to_page_request(),
            Err(PageParamsError::SizeOutOfRange {
                min: 1,
                max: 1000,
                got: 0
            })
        );
    }

    #[test]
    fn test_size_bounds() {
        assert!(params(None, Some(1)).to_page_request().is_ok());
        assert!(params(None, Some(1000)).to_page_request().is_ok());
        assert!(params(None, Some(1001)).to_page_request().is_err());
    }

    #[test]
    fn test_error_maps_to_bad_request() {
        let err: AppError = PageParamsError::SizeOutOfRange {
            min: 1,
            max: 1000,
            got: 5000,
        }
        .into();

        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.to_string(), "Page size must be between 1 and 1000, got 5000");
    }

    #[test]
    fn test_page_response_from_page() {
        let page = Page::new(vec![1_i32, 2], PageRequest::new(0, 2), 3);
        let response: PageResponse<i64> = page.into();

        assert_eq!(response.content, vec![1_i64, 2]);
        assert_eq!(response.pagination.total_elements, 3);
        assert_eq!(response.pagination.total_pages, 2);
    }

    #[test]
    fn test_pagination_meta_is_camel_case() {
        let meta = PaginationMeta {
            page: 0,
            size: 20,
            total_elements: 1,
            total_pages: 1,
        };
        let value = serde_json::to_value(meta).unwrap();

        assert_eq!(value["totalElements"], 1);
        assert_eq!(value["totalPages"], 1);
    }
}
