//! Field value type shared by shaping and in-memory ordering

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use uuid::Uuid;

/// A polymorphic field value read from a record through its property table
///
/// Serializes untagged, so a shaped record renders as a plain JSON object.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Uuid(Uuid),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    Null,
}

impl FieldValue {
    /// Total order used when sorting records in memory.
    ///
    /// Values of the same variant compare naturally (strings ignore case,
    /// floats use `total_cmp`). `Null` sorts first; mixed variants fall back
    /// to variant rank.
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FieldValue::String(a), FieldValue::String(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
            (FieldValue::Float(a), FieldValue::Float(b)) => a.total_cmp(b),
            (FieldValue::Integer(a), FieldValue::Float(b)) => (*a as f64).total_cmp(b),
            (FieldValue::Float(a), FieldValue::Integer(b)) => a.total_cmp(&(*b as f64)),
            (FieldValue::Boolean(a), FieldValue::Boolean(b)) => a.cmp(b),
            (FieldValue::Uuid(a), FieldValue::Uuid(b)) => a.cmp(b),
            (FieldValue::Date(a), FieldValue::Date(b)) => a.cmp(b),
            (FieldValue::DateTime(a), FieldValue::DateTime(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            FieldValue::Null => 0,
            FieldValue::Boolean(_) => 1,
            FieldValue::Integer(_) | FieldValue::Float(_) => 2,
            FieldValue::String(_) => 3,
            FieldValue::Uuid(_) => 4,
            FieldValue::Date(_) => 5,
            FieldValue::DateTime(_) => 6,
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<Uuid> for FieldValue {
    fn from(value: Uuid) -> Self {
        FieldValue::Uuid(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::DateTime(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_converts_to_null() {
        let none: Option<String> = None;
        assert_eq!(FieldValue::from(none), FieldValue::Null);
        assert_eq!(
            FieldValue::from(Some("x".to_string())),
            FieldValue::String("x".to_string())
        );
    }

    #[test]
    fn test_uuid_renders_hyphenated() {
        let id = Uuid::parse_str("d28888e9-2ba9-473a-a40f-e38cb54f9b35").unwrap();
        assert_eq!(
            serde_json::to_value(FieldValue::from(id)).unwrap(),
            serde_json::json!("d28888e9-2ba9-473a-a40f-e38cb54f9b35")
        );
    }

    #[test]
    fn test_sort_cmp_strings_ignore_case() {
        let a = FieldValue::from("alpha");
        let b = FieldValue::from("Beta");
        assert_eq!(a.sort_cmp(&b), Ordering::Less);
        assert_eq!(b.sort_cmp(&a), Ordering::Greater);
    }

    #[test]
    fn test_sort_cmp_dates() {
        let older = FieldValue::from(NaiveDate::from_ymd_opt(1950, 1, 1).unwrap());
        let younger = FieldValue::from(NaiveDate::from_ymd_opt(1990, 6, 15).unwrap());
        assert_eq!(older.sort_cmp(&younger), Ordering::Less);
    }

    #[test]
    fn test_sort_cmp_null_first() {
        let null = FieldValue::Null;
        assert_eq!(null.sort_cmp(&FieldValue::from("a")), Ordering::Less);
        assert_eq!(FieldValue::from(1_i64).sort_cmp(&null), Ordering::Greater);
    }

    #[test]
    fn test_sort_cmp_mixed_numbers() {
        let int = FieldValue::from(2_i64);
        let float = FieldValue::from(2.5);
        assert_eq!(int.sort_cmp(&float), Ordering::Less);
    }

    #[test]
    fn test_serialize_untagged() {
        let date = FieldValue::from(NaiveDate::from_ymd_opt(1650, 7, 23).unwrap());
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"1650-07-23\"");
        assert_eq!(serde_json::to_string(&FieldValue::Null).unwrap(), "null");
        assert_eq!(
            serde_json::to_string(&FieldValue::from(true)).unwrap(),
            "true"
        );
    }

    #[test]
    fn test_dates_render_as_iso_strings() {
        let date = FieldValue::from(NaiveDate::from_ymd_opt(2000, 1, 2).unwrap());
        assert_eq!(serde_json::to_value(&date).unwrap(), serde_json::json!("2000-01-02"));
        assert_eq!(date, FieldValue::Date(NaiveDate::from_ymd_opt(2000, 1, 2).unwrap()));
    }
}
