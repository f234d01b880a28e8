//! # Course Library
//!
//! A REST API over authors and their courses, built around two reusable
//! pieces of query plumbing.
//!
//! ## Features
//!
//! - **Data Shaping**: Return only the properties a client lists in `fields`
//! - **Sort Mapping**: Translate client-facing `orderBy` properties into
//!   storage fields, with one-to-many expansion and direction reversal
//! - **Pre-validation**: Reject unknown fields and sort properties with a
//!   400 before any query runs
//! - **Paging**: Page metadata and navigation links in an `X-Pagination` header
//! - **Configuration-Based**: Server and paging settings from YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use course_library::prelude::*;
//!
//! pub struct BookDto {
//!     pub id: Uuid,
//!     pub title: String,
//! }
//!
//! impl_shapeable!(BookDto {
//!     "id" => id,
//!     "title" => title,
//! });
//!
//! // [{"title": "..."}, ...]
//! let records = books.shape_data(Some("title"))?;
//!
//! let mut registry = PropertyMappingService::builder();
//! registry.register::<BookDto, Book>(
//!     PropertyMapping::new().property("Title", [SortTarget::field("Title")]),
//! )?;
//! let mappings = registry.build();
//! assert!(mappings.valid_mapping_exists::<BookDto, Book>(Some("title desc")));
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod mapping;
pub mod server;
pub mod shaping;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{
            ArgumentError, ConfigError, EntityError, LibraryError, LibraryResult, LookupError,
            ValidationError,
        },
        field::FieldValue,
        property::{PropertyDescriptor, PropertyInfoCache, PropertyTable, Shapeable},
        query::{
            AuthorsResourceParameters, CoursesResourceParameters, FieldsParameters, PagedList,
            PaginationMetadata, ResourceUriType,
        },
        repository::{AuthorsQuery, CourseLibraryRepository},
    };

    // === Macros ===
    pub use crate::impl_shapeable;

    // === Shaping ===
    pub use crate::shaping::{ShapeData, ShapedRecord, has_properties, shape, shape_one};

    // === Mapping ===
    pub use crate::mapping::{
        PropertyMapping, PropertyMappingRegistry, PropertyMappingService, SortKey, SortTarget,
    };

    // === Entities ===
    pub use crate::entities::{
        Author, AuthorDto, AuthorForCreationDto, Course, CourseDto, CourseForCreationDto,
        default_property_mappings,
    };

    // === Storage ===
    pub use crate::storage::InMemoryCourseLibraryRepository;

    // === Config ===
    pub use crate::config::{LibraryConfig, PaginationConfig, ServerConfig};

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder, build_api_routes};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{NaiveDate, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
