//! In-memory implementation of CourseLibraryRepository for testing and development

use crate::core::property::Shapeable;
use crate::core::query::PagedList;
use crate::core::repository::{AuthorsQuery, CourseLibraryRepository};
use crate::entities::{Author, Course};
use crate::mapping::SortKey;
use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory course library
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryCourseLibraryRepository {
    authors: Arc<RwLock<HashMap<Uuid, Author>>>,
    courses: Arc<RwLock<HashMap<Uuid, Course>>>,
}

impl InMemoryCourseLibraryRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-filled with authors and courses
    pub fn with_data(
        authors: impl IntoIterator<Item = Author>,
        courses: impl IntoIterator<Item = Course>,
    ) -> Self {
        Self {
            authors: Arc::new(RwLock::new(
                authors.into_iter().map(|a| (a.id, a)).collect(),
            )),
            courses: Arc::new(RwLock::new(
                courses.into_iter().map(|c| (c.id, c)).collect(),
            )),
        }
    }
}

/// Order `items` by storage-level sort keys, then by ID for stability
///
/// Field values are read through the type's property table, so any property
/// that can be shaped can also be sorted on.
pub fn sort_by_keys<T: Shapeable>(
    items: &mut [T],
    keys: &[SortKey],
    id_of: fn(&T) -> Uuid,
) -> Result<()> {
    let table = T::property_table();
    let descriptors = keys
        .iter()
        .map(|key| {
            table
                .find(&key.field)
                .map(|descriptor| (*descriptor, key.ascending))
                .ok_or_else(|| {
                    anyhow!(
                        "Sort field '{}' does not exist on {}",
                        key.field,
                        table.type_name()
                    )
                })
        })
        .collect::<Result<Vec<_>>>()?;

    items.sort_by(|a, b| {
        descriptors
            .iter()
            .map(|(descriptor, ascending)| {
                let ordering = descriptor.value_of(a).sort_cmp(&descriptor.value_of(b));
                if *ascending { ordering } else { ordering.reverse() }
            })
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or_else(|| id_of(a).cmp(&id_of(b)))
    });

    Ok(())
}

fn matches_filters(author: &Author, main_category: Option<&str>, search: Option<&str>) -> bool {
    let category_ok = main_category
        .is_none_or(|category| author.main_category.trim().eq_ignore_ascii_case(category));
    let search_ok = search.is_none_or(|needle| {
        [&author.main_category, &author.first_name, &author.last_name]
            .iter()
            .any(|haystack| haystack.to_lowercase().contains(needle))
    });
    category_ok && search_ok
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[async_trait]
impl CourseLibraryRepository for InMemoryCourseLibraryRepository {
    async fn get_authors(&self, query: &AuthorsQuery) -> Result<PagedList<Author>> {
        let main_category = non_blank(query.main_category.as_deref());
        let search = non_blank(query.search_query.as_deref()).map(str::to_lowercase);

        let mut selected: Vec<Author> = {
            let authors = self
                .authors
                .read()
                .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

            authors
                .values()
                .filter(|author| matches_filters(author, main_category, search.as_deref()))
                .cloned()
                .collect()
        };

        sort_by_keys(&mut selected, &query.sort, |a| a.id)?;

        Ok(PagedList::create(
            selected,
            query.page_number,
            query.page_size,
        ))
    }

    async fn get_author(&self, author_id: &Uuid) -> Result<Option<Author>> {
        let authors = self
            .authors
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(authors.get(author_id).cloned())
    }

    async fn author_exists(&self, author_id: &Uuid) -> Result<bool> {
        let authors = self
            .authors
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(authors.contains_key(author_id))
    }

    async fn add_author(&self, author: Author) -> Result<Author> {
        let mut authors = self
            .authors
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if authors.contains_key(&author.id) {
            bail!("Author {} already exists", author.id);
        }
        authors.insert(author.id, author.clone());

        Ok(author)
    }

    async fn delete_author(&self, author_id: &Uuid) -> Result<bool> {
        let mut authors = self
            .authors
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        let mut courses = self
            .courses
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if authors.remove(author_id).is_none() {
            return Ok(false);
        }
        courses.retain(|_, course| &course.author_id != author_id);

        Ok(true)
    }

    async fn get_courses(&self, author_id: &Uuid, sort: &[SortKey]) -> Result<Vec<Course>> {
        let mut selected: Vec<Course> = {
            let courses = self
                .courses
                .read()
                .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

            courses
                .values()
                .filter(|course| &course.author_id == author_id)
                .cloned()
                .collect()
        };

        if sort.is_empty() {
            sort_by_keys(&mut selected, &[SortKey::new("Title", true)], |c| c.id)?;
        } else {
            sort_by_keys(&mut selected, sort, |c| c.id)?;
        }

        Ok(selected)
    }

    async fn get_course(&self, author_id: &Uuid, course_id: &Uuid) -> Result<Option<Course>> {
        let courses = self
            .courses
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(courses
            .get(course_id)
            .filter(|course| &course.author_id == author_id)
            .cloned())
    }

    async fn add_course(&self, course: Course) -> Result<Course> {
        if !self.author_exists(&course.author_id).await? {
            bail!("Author {} does not exist", course.author_id);
        }

        let mut courses = self
            .courses
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        courses.insert(course.id, course.clone());

        Ok(course)
    }

    async fn delete_course(&self, author_id: &Uuid, course_id: &Uuid) -> Result<bool> {
        let mut courses = self
            .courses
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        match courses.get(course_id) {
            Some(course) if &course.author_id == author_id => {
                courses.remove(course_id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
