//! The loosely-typed output record of data shaping

use crate::core::field::FieldValue;
use indexmap::IndexMap;
use indexmap::map::Iter;
use serde::Serialize;

/// An insertion-ordered map from canonical property name to value
///
/// Serializes as a plain JSON object whose keys keep the order in which the
/// properties were requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ShapedRecord(IndexMap<String, FieldValue>);

impl ShapedRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty record with room for `capacity` properties
    pub fn with_capacity(capacity: usize) -> Self {
        Self(IndexMap::with_capacity(capacity))
    }

    /// Append a property, keeping its position if the name already exists
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.0.insert(name.into(), value);
    }

    /// Get a property value by its canonical name
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    /// Property names in record order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterate over `(name, value)` pairs in record order
    pub fn iter(&self) -> Iter<'_, String, FieldValue> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a ShapedRecord {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_keep_insertion_order() {
        let mut record = ShapedRecord::new();
        record.insert("name", FieldValue::from("Ada"));
        record.insert("id", FieldValue::from(7_i64));
        record.insert("age", FieldValue::from(36_i64));

        let keys: Vec<_> = record.keys().collect();
        assert_eq!(keys, vec!["name", "id", "age"]);
    }

    #[test]
    fn test_serializes_as_ordered_object() {
        let mut record = ShapedRecord::with_capacity(2);
        record.insert("name", FieldValue::from("Ada"));
        record.insert("id", FieldValue::from(7_i64));

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"name":"Ada","id":7}"#);
    }

    #[test]
    fn test_get_and_len() {
        let mut record = ShapedRecord::new();
        assert!(record.is_empty());
        record.insert("name", FieldValue::Null);
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("name"), Some(&FieldValue::Null));
        assert_eq!(record.get("Name"), None);
    }
}
