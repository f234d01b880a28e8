//! Absolute URLs for resources and collection pages

use crate::core::query::{AuthorsResourceParameters, ResourceUriType};
use url::{ParseError, Url};
use uuid::Uuid;

/// Builds resource URLs under the configured public base URL
#[derive(Debug, Clone)]
pub struct ResourceLinks {
    base: Url,
}

impl ResourceLinks {
    pub fn new(public_base_url: &str) -> Result<Self, ParseError> {
        let base = Url::parse(public_base_url)?;
        if base.cannot_be_a_base() {
            return Err(ParseError::RelativeUrlWithCannotBeABaseBase);
        }
        Ok(Self { base })
    }

    fn at<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url, ParseError> {
        let mut url = self.base.clone();
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|_| ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `/api/authors/{author_id}`
    pub fn author(&self, author_id: &Uuid) -> Result<String, ParseError> {
        let id = author_id.to_string();
        Ok(self.at(["api", "authors", id.as_str()])?.into())
    }

    /// `/api/authors/{author_id}/courses/{course_id}`
    pub fn course(&self, author_id: &Uuid, course_id: &Uuid) -> Result<String, ParseError> {
        let author = author_id.to_string();
        let course = course_id.to_string();
        Ok(self
            .at(["api", "authors", author.as_str(), "courses", course.as_str()])?
            .into())
    }

    /// Author collection page relative to the requested one
    ///
    /// Carries the caller's field selection, ordering and filters so that
    /// following the link reproduces the same view one page over.
    pub fn authors_page(
        &self,
        params: &AuthorsResourceParameters,
        page_size: usize,
        uri_type: ResourceUriType,
    ) -> Result<String, ParseError> {
        let current = params.page_number();
        let page_number = match uri_type {
            ResourceUriType::PreviousPage => current.saturating_sub(1).max(1),
            ResourceUriType::NextPage => current + 1,
        };

        let mut url = self.at(["api", "authors"])?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(fields) = params.fields() {
                query.append_pair("fields", fields);
            }
            query
                .append_pair("orderBy", &params.order_by)
                .append_pair("pageNumber", &page_number.to_string())
                .append_pair("pageSize", &page_size.to_string());
            if let Some(category) = params.main_category.as_deref() {
                query.append_pair("mainCategory", category);
            }
            if let Some(search) = params.search_query.as_deref() {
                query.append_pair("searchQuery", search);
            }
        }
        Ok(url.into())
    }
}
