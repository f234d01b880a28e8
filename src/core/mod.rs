//! Core module containing fundamental traits and types for the library

pub mod error;
pub mod field;
pub mod property;
pub mod query;
pub mod repository;

pub use error::{LibraryError, LibraryResult};
pub use field::FieldValue;
pub use property::{PropertyDescriptor, PropertyInfoCache, PropertyTable, Shapeable};
pub use query::{
    AuthorsResourceParameters, CoursesResourceParameters, FieldsParameters, PagedList,
    PaginationMetadata, ResourceUriType,
};
pub use repository::{AuthorsQuery, CourseLibraryRepository};
