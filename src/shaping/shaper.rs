//! Reduce records to a caller-chosen subset of their properties

use super::record::ShapedRecord;
use crate::core::error::{ArgumentError, LibraryResult};
use crate::core::property::Shapeable;

/// Shape a sequence of records
///
/// `items` of `None` is the absent-sequence case and fails with an argument
/// error; an empty slice yields an empty result. The field list is resolved
/// once against the cached property table of `T`, then applied to every
/// item in input order.
///
/// # Errors
///
/// - [`ArgumentError::Missing`] when `items` is `None`
/// - [`LookupError::PropertyNotFound`](crate::core::error::LookupError::PropertyNotFound)
///   naming the first unknown field and `T`
pub fn shape<T: Shapeable>(
    items: Option<&[T]>,
    fields: Option<&str>,
) -> LibraryResult<Vec<ShapedRecord>> {
    let items = items.ok_or(ArgumentError::Missing { argument: "items" })?;

    let table = T::property_table();
    let properties = table.resolve(fields).inspect_err(|e| {
        tracing::debug!(
            type_name = table.type_name(),
            error = %e,
            "field selection rejected"
        );
    })?;

    let records = items
        .iter()
        .map(|item| {
            let mut record = ShapedRecord::with_capacity(properties.len());
            for property in &properties {
                record.insert(property.name(), property.value_of(item));
            }
            record
        })
        .collect();

    Ok(records)
}

/// Shape a single record
pub fn shape_one<T: Shapeable>(item: &T, fields: Option<&str>) -> LibraryResult<ShapedRecord> {
    let mut records = shape(Some(std::slice::from_ref(item)), fields)?;
    Ok(records.pop().unwrap_or_default())
}

/// Method-call access to the shaper
///
/// ```rust,ignore
/// let body = dtos.shape_data(params.fields.as_deref())?;
/// ```
pub trait ShapeData {
    type Output;

    fn shape_data(&self, fields: Option<&str>) -> LibraryResult<Self::Output>;
}

impl<T: Shapeable> ShapeData for [T] {
    type Output = Vec<ShapedRecord>;

    fn shape_data(&self, fields: Option<&str>) -> LibraryResult<Self::Output> {
        shape(Some(self), fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{LibraryError, LookupError};
    use crate::core::field::FieldValue;

    struct Planet {
        name: String,
        moons: i64,
        ringed: bool,
    }

    crate::impl_shapeable!(Planet {
        "Name" => name,
        "Moons" => moons,
        "Ringed" => ringed,
    });

    fn planets() -> Vec<Planet> {
        vec![
            Planet {
                name: "Saturn".to_string(),
                moons: 146,
                ringed: true,
            },
            Planet {
                name: "Mars".to_string(),
                moons: 2,
                ringed: false,
            },
        ]
    }

    #[test]
    fn test_shape_all_properties_when_no_fields() {
        let planets = planets();
        let records = shape(Some(planets.as_slice()), None).unwrap();
        assert_eq!(records.len(), 2);
        for record in &records {
            let keys: Vec<_> = record.keys().collect();
            assert_eq!(keys, vec!["Name", "Moons", "Ringed"]);
        }
    }

    #[test]
    fn test_shape_preserves_item_order() {
        let planets = planets();
        let records = shape(Some(planets.as_slice()), Some("name")).unwrap();
        assert_eq!(records[0].get("Name"), Some(&FieldValue::from("Saturn")));
        assert_eq!(records[1].get("Name"), Some(&FieldValue::from("Mars")));
    }

    #[test]
    fn test_shape_absent_items_is_argument_error() {
        let err = shape::<Planet>(None, None).unwrap_err();
        assert!(matches!(
            err,
            LibraryError::Argument(ArgumentError::Missing { argument: "items" })
        ));
    }

    #[test]
    fn test_shape_unknown_field() {
        let planets = planets();
        let err = shape(Some(planets.as_slice()), Some("name,mass")).unwrap_err();
        match err {
            LibraryError::Lookup(LookupError::PropertyNotFound {
                property,
                type_name,
            }) => {
                assert_eq!(property, "mass");
                assert_eq!(type_name, "Planet");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_shape_unknown_field_fails_even_without_items() {
        let empty: Vec<Planet> = Vec::new();
        assert!(shape(Some(empty.as_slice()), Some("mass")).is_err());
    }

    #[test]
    fn test_shape_one() {
        let planets = planets();
        let record = shape_one(&planets[1], Some("ringed, moons")).unwrap();
        let keys: Vec<_> = record.keys().collect();
        assert_eq!(keys, vec!["Ringed", "Moons"]);
        assert_eq!(record.get("Moons"), Some(&FieldValue::Integer(2)));
    }

    #[test]
    fn test_shape_data_extension() {
        let records = planets().shape_data(Some("MOONS")).unwrap();
        assert_eq!(records[0].get("Moons"), Some(&FieldValue::Integer(146)));
    }
}
