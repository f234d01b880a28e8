//! Query parameters and pagination utilities

use crate::config::PaginationConfig;
use serde::{Deserialize, Serialize};

/// Query parameters accepted by `GET /api/authors`
///
/// # Example
/// ```rust,ignore
/// pub async fn get_authors(
///     Query(params): Query<AuthorsResourceParameters>,
/// ) -> LibraryResult<Response> {
///     // params.page_number() defaults to 1
///     // params.order_by defaults to "Name"
/// }
///
/// // Usage:
/// GET /api/authors?mainCategory=Rum&orderBy=age desc&fields=id,name
/// GET /api/authors?searchQuery=ann&pageNumber=2&pageSize=5
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthorsResourceParameters {
    /// Exact main category filter (trimmed, case-insensitive)
    pub main_category: Option<String>,

    /// Substring searched in main category, first and last name
    pub search_query: Option<String>,

    /// Page number (starts at 1)
    pub page_number: Option<usize>,

    /// Requested page size, clamped by configuration
    pub page_size: Option<usize>,

    /// Comma-separated `property [asc|desc]` list
    pub order_by: String,

    /// Comma-separated list of properties to return
    pub fields: Option<String>,
}

impl Default for AuthorsResourceParameters {
    fn default() -> Self {
        Self {
            main_category: None,
            search_query: None,
            page_number: None,
            page_size: None,
            order_by: "Name".to_string(),
            fields: None,
        }
    }
}

impl AuthorsResourceParameters {
    /// Get page number, ensuring minimum of 1
    pub fn page_number(&self) -> usize {
        self.page_number.unwrap_or(1).max(1)
    }

    /// Get page size, clamped to the configured maximum
    pub fn page_size(&self, pagination: &PaginationConfig) -> usize {
        pagination.page_size(self.page_size)
    }

    pub fn fields(&self) -> Option<&str> {
        self.fields.as_deref()
    }

    pub fn order_by(&self) -> Option<&str> {
        Some(self.order_by.as_str())
    }
}

/// `?fields=` on single-resource endpoints
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FieldsParameters {
    pub fields: Option<String>,
}

impl FieldsParameters {
    pub fn fields(&self) -> Option<&str> {
        self.fields.as_deref()
    }
}

/// Query parameters accepted by the course collection endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CoursesResourceParameters {
    pub order_by: Option<String>,
    pub fields: Option<String>,
}

impl CoursesResourceParameters {
    pub fn order_by(&self) -> Option<&str> {
        self.order_by.as_deref()
    }

    pub fn fields(&self) -> Option<&str> {
        self.fields.as_deref()
    }
}

/// One page of a filtered and ordered collection
#[derive(Debug, Clone, PartialEq)]
pub struct PagedList<T> {
    items: Vec<T>,
    total_count: usize,
    page_size: usize,
    current_page: usize,
    total_pages: usize,
}

impl<T> PagedList<T> {
    /// Cut page `page_number` out of an already filtered and ordered source
    pub fn create(source: Vec<T>, page_number: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let current_page = page_number.max(1);
        let total_count = source.len();
        let total_pages = total_count.div_ceil(page_size);
        let skip = (current_page - 1).saturating_mul(page_size);

        let items = source.into_iter().skip(skip).take(page_size).collect();

        Self {
            items,
            total_count,
            page_size,
            current_page,
            total_pages,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Convert the items while keeping the paging state
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedList<U> {
        PagedList {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page_size: self.page_size,
            current_page: self.current_page,
            total_pages: self.total_pages,
        }
    }
}

/// Body of the `X-Pagination` response header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    pub total_count: usize,
    pub page_size: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub previous_page_link: Option<String>,
    pub next_page_link: Option<String>,
}

impl PaginationMetadata {
    pub fn new<T>(
        page: &PagedList<T>,
        previous_page_link: Option<String>,
        next_page_link: Option<String>,
    ) -> Self {
        Self {
            total_count: page.total_count(),
            page_size: page.page_size(),
            current_page: page.current_page(),
            total_pages: page.total_pages(),
            previous_page_link,
            next_page_link,
        }
    }
}

/// Which page a generated collection link points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceUriType {
    PreviousPage,
    NextPage,
}
