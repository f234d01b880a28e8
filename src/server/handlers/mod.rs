//! HTTP handlers for the authors and courses API

pub mod authors;
pub mod courses;

use crate::config::LibraryConfig;
use crate::core::error::{LibraryResult, ValidationError};
use crate::core::property::Shapeable;
use crate::core::repository::CourseLibraryRepository;
use crate::mapping::PropertyMappingService;
use crate::server::links::ResourceLinks;
use crate::shaping::has_properties;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn CourseLibraryRepository>,
    pub mappings: Arc<PropertyMappingService>,
    pub config: Arc<LibraryConfig>,
    pub links: Arc<ResourceLinks>,
}

impl AppState {
    /// Reject an `orderBy` expression that the `TDto -> TEntity` table cannot map
    pub(crate) fn check_order_by<TDto: 'static, TEntity: 'static>(
        &self,
        order_by: Option<&str>,
    ) -> LibraryResult<()> {
        if self
            .mappings
            .valid_mapping_exists::<TDto, TEntity>(order_by)
        {
            return Ok(());
        }
        let order_by = order_by.unwrap_or_default().to_string();
        tracing::warn!(%order_by, "rejected request with invalid orderBy");
        Err(ValidationError::InvalidOrderBy { order_by }.into())
    }
}

/// Reject a field selection naming a property `TDto` does not have
pub(crate) fn check_fields<TDto: Shapeable>(fields: Option<&str>) -> LibraryResult<()> {
    if has_properties::<TDto>(fields) {
        return Ok(());
    }
    let fields = fields.unwrap_or_default().to_string();
    tracing::warn!(%fields, "rejected request with invalid fields");
    Err(ValidationError::InvalidFields { fields }.into())
}
