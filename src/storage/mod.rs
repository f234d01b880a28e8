//! Storage implementations for the course library

pub mod in_memory;

pub use in_memory::{InMemoryCourseLibraryRepository, sort_by_keys};
