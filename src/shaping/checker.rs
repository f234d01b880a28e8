//! Non-failing pre-validation of field selections

use crate::core::property::Shapeable;

/// Check that every name in a comma-separated field list is a property of `T`
///
/// Parses exactly like [`shape`](super::shape) but returns `false` on the
/// first unknown name instead of failing. An absent or blank list is
/// vacuously satisfied.
pub fn has_properties<T: Shapeable>(fields: Option<&str>) -> bool {
    let table = T::property_table();
    match table.resolve(fields) {
        Ok(_) => true,
        Err(e) => {
            tracing::debug!(type_name = table.type_name(), error = %e, "unknown field requested");
            false
        }
    }
}
