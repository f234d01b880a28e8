//! Storage abstraction for authors and their courses

use crate::core::query::PagedList;
use crate::entities::{Author, Course};
use crate::mapping::SortKey;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Filtering, ordering and paging for an author collection query
///
/// `sort` holds storage-level keys already translated from the client's
/// `orderBy` expression.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorsQuery {
    pub main_category: Option<String>,
    pub search_query: Option<String>,
    pub page_number: usize,
    pub page_size: usize,
    pub sort: Vec<SortKey>,
}

impl Default for AuthorsQuery {
    fn default() -> Self {
        Self {
            main_category: None,
            search_query: None,
            page_number: 1,
            page_size: 10,
            sort: Vec::new(),
        }
    }
}

/// Service trait for author and course persistence
///
/// Implementations are shared behind an `Arc` by every request handler.
#[async_trait]
pub trait CourseLibraryRepository: Send + Sync {
    /// Filter, sort and page the author collection
    async fn get_authors(&self, query: &AuthorsQuery) -> Result<PagedList<Author>>;

    /// Get an author by ID
    async fn get_author(&self, author_id: &Uuid) -> Result<Option<Author>>;

    /// Check whether an author exists
    async fn author_exists(&self, author_id: &Uuid) -> Result<bool>;

    /// Store a new author
    async fn add_author(&self, author: Author) -> Result<Author>;

    /// Delete an author and all of their courses
    ///
    /// Returns `false` when the author did not exist.
    async fn delete_author(&self, author_id: &Uuid) -> Result<bool>;

    /// List the courses of an author ordered by `sort` (title when empty)
    async fn get_courses(&self, author_id: &Uuid, sort: &[SortKey]) -> Result<Vec<Course>>;

    /// Get one course of an author
    async fn get_course(&self, author_id: &Uuid, course_id: &Uuid) -> Result<Option<Course>>;

    /// Store a new course
    async fn add_course(&self, course: Course) -> Result<Course>;

    /// Delete one course of an author
    ///
    /// Returns `false` when the course did not exist.
    async fn delete_course(&self, author_id: &Uuid, course_id: &Uuid) -> Result<bool>;
}
