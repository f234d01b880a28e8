//! Domain entities, their client-facing DTOs and default sort mappings

#[macro_use]
pub mod macros;

pub mod author;
pub mod course;

pub use author::{Author, AuthorDto, AuthorForCreationDto, age_on};
pub use course::{Course, CourseDto, CourseForCreationDto};

use crate::core::error::ConfigError;
use crate::mapping::{PropertyMapping, PropertyMappingService, SortTarget};

/// `AuthorDto` → `Author` sort mapping
///
/// A higher age means an earlier date of birth, so `Age` is reverted.
pub fn author_property_mapping() -> PropertyMapping {
    PropertyMapping::new()
        .property("Id", [SortTarget::field("Id")])
        .property("MainCategory", [SortTarget::field("MainCategory")])
        .property("Age", [SortTarget::reverted("DateOfBirth")])
        .property(
            "Name",
            [SortTarget::field("FirstName"), SortTarget::field("LastName")],
        )
}

/// `CourseDto` → `Course` sort mapping
pub fn course_property_mapping() -> PropertyMapping {
    PropertyMapping::new()
        .property("Id", [SortTarget::field("Id")])
        .property("Title", [SortTarget::field("Title")])
}

/// Mapping service with every table the REST layer needs
pub fn default_property_mappings() -> Result<PropertyMappingService, ConfigError> {
    let mut registry = PropertyMappingService::builder();
    registry
        .register::<AuthorDto, Author>(author_property_mapping())?
        .register::<CourseDto, Course>(course_property_mapping())?;
    Ok(registry.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::SortKey;

    #[test]
    fn test_default_mappings_registered() {
        let service = default_property_mappings().unwrap();
        assert!(service.is_registered::<AuthorDto, Author>());
        assert!(service.is_registered::<CourseDto, Course>());
        assert!(!service.is_registered::<AuthorDto, Course>());
    }

    #[test]
    fn test_author_name_expands_to_both_names() {
        let service = default_property_mappings().unwrap();
        let keys = service
            .translate::<AuthorDto, Author>(Some("name desc"))
            .unwrap();
        assert_eq!(
            keys,
            vec![SortKey::new("FirstName", false), SortKey::new("LastName", false)]
        );
    }

    #[test]
    fn test_author_age_is_reverted() {
        let service = default_property_mappings().unwrap();
        assert_eq!(
            service.translate::<AuthorDto, Author>(Some("age")).unwrap(),
            vec![SortKey::new("DateOfBirth", false)]
        );
        assert_eq!(
            service
                .translate::<AuthorDto, Author>(Some("age desc"))
                .unwrap(),
            vec![SortKey::new("DateOfBirth", true)]
        );
    }

    #[test]
    fn test_mapped_storage_fields_exist_on_entities() {
        use crate::core::property::Shapeable;

        let service = default_property_mappings().unwrap();
        let authors = service.mapping_for::<AuthorDto, Author>().unwrap();
        for property in authors.properties() {
            for target in authors.get(property).unwrap() {
                assert!(Author::property_table().find(&target.field).is_some());
            }
        }
        let courses = service.mapping_for::<CourseDto, Course>().unwrap();
        for property in courses.properties() {
            for target in courses.get(property).unwrap() {
                assert!(Course::property_table().find(&target.field).is_some());
            }
        }
    }
}
