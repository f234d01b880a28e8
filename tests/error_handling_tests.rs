//! Tests for the typed error handling system
//!
//! These tests verify that:
//! - Errors return correct HTTP status codes
//! - Error responses are properly formatted
//! - Error conversions work correctly
//! - Error matching allows clients to handle specific cases

use axum::http::StatusCode;
use axum::response::IntoResponse;
use course_library::prelude::*;

// =============================================================================
// HTTP Status Code Tests
// =============================================================================

mod status_code_tests {
    use super::*;

    #[test]
    fn test_entity_not_found_returns_404() {
        let err = LibraryError::Entity(EntityError::NotFound {
            entity_type: "Author",
            id: Uuid::new_v4(),
        });
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_order_by_returns_400() {
        let err = LibraryError::Validation(ValidationError::InvalidOrderBy {
            order_by: "shoeSize".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_fields_returns_400() {
        let err = LibraryError::Validation(ValidationError::InvalidFields {
            fields: "parrot".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_property_not_found_returns_400() {
        let err = LibraryError::Lookup(LookupError::PropertyNotFound {
            property: "parrot".to_string(),
            type_name: "AuthorDto",
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unregistered_mapping_returns_500() {
        let err = LibraryError::Lookup(LookupError::MappingNotRegistered {
            output_type: "AuthorDto",
            storage_type: "Course",
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_config_error_returns_500() {
        let err = LibraryError::Config(ConfigError::DuplicateMapping {
            output_type: "AuthorDto",
            storage_type: "Author",
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

// =============================================================================
// Error Response Tests
// =============================================================================

mod response_tests {
    use super::*;

    #[test]
    fn test_property_not_found_response() {
        let err = LibraryError::from(LookupError::PropertyNotFound {
            property: "parrot".to_string(),
            type_name: "AuthorDto",
        });
        let response = err.to_response();
        assert_eq!(response.code, "PROPERTY_NOT_FOUND");
        assert_eq!(response.message, "Property parrot wasn't found on AuthorDto");
        let details = response.details.unwrap();
        assert_eq!(details["property"], "parrot");
        assert_eq!(details["type"], "AuthorDto");
    }

    #[test]
    fn test_internal_error_has_no_details() {
        let err = LibraryError::Internal("lock poisoned".to_string());
        let response = err.to_response();
        assert_eq!(response.code, "INTERNAL_ERROR");
        assert!(response.details.is_none());
    }

    #[test]
    fn test_into_response_status() {
        let err = LibraryError::from(ValidationError::InvalidOrderBy {
            order_by: "shoeSize".to_string(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

// =============================================================================
// Conversion Tests
// =============================================================================

mod conversion_tests {
    use super::*;

    #[test]
    fn test_shaping_error_converts_to_lookup() {
        #[derive(Clone)]
        struct Parrot {
            name: String,
        }
        impl_shapeable!(Parrot { "Name" => name });

        let flock = vec![Parrot {
            name: "Polly".to_string(),
        }];
        let err = flock.shape_data(Some("Wingspan")).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "PROPERTY_NOT_FOUND");
    }

    #[test]
    fn test_lookup_error_from_translate() {
        let mappings = default_property_mappings().unwrap();
        let err: LibraryError = mappings
            .translate::<AuthorDto, Author>(Some("shoeSize"))
            .unwrap_err()
            .into();
        assert_eq!(err.error_code(), "SORT_FIELD_NOT_MAPPED");
    }

    #[test]
    fn test_anyhow_becomes_internal() {
        let err = LibraryError::from(anyhow::anyhow!("disk on fire"));
        assert!(matches!(err, LibraryError::Internal(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_config_error_source_chain() {
        use std::error::Error;

        let yaml_err = LibraryConfig::from_yaml_str("server: [").unwrap_err();
        let err = LibraryError::from(yaml_err);
        assert!(err.source().is_some());
    }
}

// =============================================================================
// Error Matching Tests
// =============================================================================

mod matching_tests {
    use super::*;

    fn describe(err: &LibraryError) -> &'static str {
        match err {
            LibraryError::Entity(EntityError::NotFound { .. }) => "missing",
            LibraryError::Validation(_) | LibraryError::Lookup(_) => "bad request",
            LibraryError::Argument(_) | LibraryError::Config(_) | LibraryError::Internal(_) => {
                "server"
            }
        }
    }

    #[test]
    fn test_match_categories() {
        let missing = LibraryError::from(EntityError::NotFound {
            entity_type: "Course",
            id: Uuid::nil(),
        });
        assert_eq!(describe(&missing), "missing");

        let absent = LibraryError::from(ArgumentError::Missing { argument: "items" });
        assert_eq!(describe(&absent), "server");
    }
}
