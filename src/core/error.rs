//! Typed error handling for the course library
//!
//! Every failure of the shaping and sort-mapping layer is deterministic for a
//! given input and registration state, so nothing here is retried. Errors
//! surface immediately and the REST layer turns them into JSON responses.
//!
//! # Error Categories
//!
//! - [`ConfigError`]: setup-time failures (duplicate mapping registration,
//!   unreadable or invalid configuration)
//! - [`ArgumentError`]: a required input was absent (caller defect)
//! - [`LookupError`]: a property or `orderBy` field does not exist on the
//!   target type
//! - [`ValidationError`]: request input rejected before any query runs
//! - [`EntityError`]: missing authors or courses
//!
//! # Example
//!
//! ```rust,ignore
//! use course_library::prelude::*;
//!
//! match authors.shape_data(Some("name, nickname")) {
//!     Ok(records) => println!("{} records", records.len()),
//!     Err(LibraryError::Lookup(LookupError::PropertyNotFound { property, .. })) => {
//!         println!("unknown field {}", property);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// The main error type for the course library
#[derive(Debug)]
pub enum LibraryError {
    /// Setup-time configuration errors
    Config(ConfigError),

    /// A required argument was absent
    Argument(ArgumentError),

    /// Unknown property or sort field
    Lookup(LookupError),

    /// Request input rejected by pre-validation
    Validation(ValidationError),

    /// Missing entities
    Entity(EntityError),

    /// Internal errors (repository failures and the like)
    Internal(String),
}

impl fmt::Display for LibraryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::Config(e) => write!(f, "{}", e),
            LibraryError::Argument(e) => write!(f, "{}", e),
            LibraryError::Lookup(e) => write!(f, "{}", e),
            LibraryError::Validation(e) => write!(f, "{}", e),
            LibraryError::Entity(e) => write!(f, "{}", e),
            LibraryError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for LibraryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LibraryError::Config(e) => Some(e),
            LibraryError::Argument(e) => Some(e),
            LibraryError::Lookup(e) => Some(e),
            LibraryError::Validation(e) => Some(e),
            LibraryError::Entity(e) => Some(e),
            LibraryError::Internal(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl LibraryError {
    /// Get the HTTP status code for this error
    ///
    /// Lookup errors reaching the REST layer reflect unvalidated client input
    /// and map to 400. Argument and config errors are server defects.
    pub fn status_code(&self) -> StatusCode {
        match self {
            LibraryError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            LibraryError::Argument(_) => StatusCode::INTERNAL_SERVER_ERROR,
            LibraryError::Lookup(e) => e.status_code(),
            LibraryError::Validation(e) => e.status_code(),
            LibraryError::Entity(e) => e.status_code(),
            LibraryError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            LibraryError::Config(_) => "CONFIG_ERROR",
            LibraryError::Argument(_) => "ARGUMENT_ERROR",
            LibraryError::Lookup(e) => e.error_code(),
            LibraryError::Validation(e) => e.error_code(),
            LibraryError::Entity(e) => e.error_code(),
            LibraryError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            LibraryError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "id": id.to_string()
                }))
            }
            LibraryError::Lookup(LookupError::PropertyNotFound {
                property,
                type_name,
            }) => Some(serde_json::json!({
                "property": property,
                "type": type_name
            })),
            LibraryError::Validation(ValidationError::InvalidBody(errors)) => {
                serde_json::to_value(errors).ok()
            }
            _ => None,
        }
    }
}

impl IntoResponse for LibraryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors raised while setting the application up
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A mapping table was registered twice for the same type pair
    #[error("Property mapping for {output_type} -> {storage_type} is already registered")]
    DuplicateMapping {
        output_type: &'static str,
        storage_type: &'static str,
    },

    /// A mapping table is malformed
    #[error("Invalid property mapping for {output_type} -> {storage_type}: {message}")]
    InvalidMapping {
        output_type: &'static str,
        storage_type: &'static str,
        message: String,
    },

    /// Failed to read a configuration file
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Configuration values out of range
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

impl From<ConfigError> for LibraryError {
    fn from(err: ConfigError) -> Self {
        LibraryError::Config(err)
    }
}

// =============================================================================
// Argument Errors
// =============================================================================

/// A required input was absent
#[derive(Debug, Error)]
pub enum ArgumentError {
    #[error("Argument '{argument}' must not be absent")]
    Missing { argument: &'static str },
}

impl From<ArgumentError> for LibraryError {
    fn from(err: ArgumentError) -> Self {
        LibraryError::Argument(err)
    }
}

// =============================================================================
// Lookup Errors
// =============================================================================

/// A requested name does not resolve on the target type
#[derive(Debug, Error)]
pub enum LookupError {
    /// A shaping field is not a property of the source type
    #[error("Property {property} wasn't found on {type_name}")]
    PropertyNotFound {
        property: String,
        type_name: &'static str,
    },

    /// An `orderBy` clause names a property without a mapping entry
    #[error("Key mapping for {property} is missing on {output_type}")]
    SortFieldNotMapped {
        property: String,
        output_type: &'static str,
    },

    /// No mapping table exists for the type pair
    #[error("Cannot find property mapping for {output_type} -> {storage_type}")]
    MappingNotRegistered {
        output_type: &'static str,
        storage_type: &'static str,
    },
}

impl LookupError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            LookupError::PropertyNotFound { .. } => StatusCode::BAD_REQUEST,
            LookupError::SortFieldNotMapped { .. } => StatusCode::BAD_REQUEST,
            LookupError::MappingNotRegistered { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            LookupError::PropertyNotFound { .. } => "PROPERTY_NOT_FOUND",
            LookupError::SortFieldNotMapped { .. } => "SORT_FIELD_NOT_MAPPED",
            LookupError::MappingNotRegistered { .. } => "MAPPING_NOT_REGISTERED",
        }
    }
}

impl From<LookupError> for LibraryError {
    fn from(err: LookupError) -> Self {
        LibraryError::Lookup(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Request input rejected before touching the repository
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid orderBy expression: '{order_by}'")]
    InvalidOrderBy { order_by: String },

    #[error("Invalid fields selection: '{fields}'")]
    InvalidFields { fields: String },

    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] validator::ValidationErrors),
}

impl ValidationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ValidationError::InvalidOrderBy { .. } => StatusCode::BAD_REQUEST,
            ValidationError::InvalidFields { .. } => StatusCode::BAD_REQUEST,
            ValidationError::InvalidBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::InvalidOrderBy { .. } => "INVALID_ORDER_BY",
            ValidationError::InvalidFields { .. } => "INVALID_FIELDS",
            ValidationError::InvalidBody(_) => "VALIDATION_ERROR",
        }
    }
}

impl From<ValidationError> for LibraryError {
    fn from(err: ValidationError) -> Self {
        LibraryError::Validation(err)
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to stored entities
#[derive(Debug, Error)]
pub enum EntityError {
    #[error("{entity_type} with id '{id}' not found")]
    NotFound {
        entity_type: &'static str,
        id: Uuid,
    },
}

impl EntityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
        }
    }
}

impl From<EntityError> for LibraryError {
    fn from(err: EntityError) -> Self {
        LibraryError::Entity(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<url::ParseError> for LibraryError {
    fn from(err: url::ParseError) -> Self {
        LibraryError::Internal(format!("invalid resource url: {}", err))
    }
}

/// Repository failures arrive as `anyhow::Error`
impl From<anyhow::Error> for LibraryError {
    fn from(err: anyhow::Error) -> Self {
        LibraryError::Internal(format!("{:#}", err))
    }
}

/// A specialized Result type for course library operations
pub type LibraryResult<T> = Result<T, LibraryError>;
