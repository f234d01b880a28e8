//! Data shaping: reduce records to a caller-selected subset of properties
//!
//! Field names are resolved once per call against the cached property table
//! of the source type, then applied to every record. The result is a list
//! of [`ShapedRecord`]s ready for JSON serialization.

pub mod checker;
pub mod record;
pub mod shaper;

pub use checker::has_properties;
pub use record::ShapedRecord;
pub use shaper::{ShapeData, shape, shape_one};
