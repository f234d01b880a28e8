//! Registration and lookup of property mapping tables
//!
//! Mapping tables are registered on a [`PropertyMappingRegistry`] while the
//! application is being set up, then frozen into an immutable
//! [`PropertyMappingService`] that request handlers share through an `Arc`.

use super::order_by::{SortKey, parse_order_by};
use crate::core::error::{ConfigError, LookupError};
use crate::core::property::short_type_name;
use std::any::TypeId;
use std::collections::HashMap;

/// One storage field backing an output property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortTarget {
    /// Storage field name
    pub field: String,
    /// Invert the client-requested direction for this field
    pub revert: bool,
}

impl SortTarget {
    pub fn new(field: impl Into<String>, revert: bool) -> Self {
        Self {
            field: field.into(),
            revert,
        }
    }

    /// A storage field sorted in the client-requested direction
    pub fn field(field: impl Into<String>) -> Self {
        Self::new(field, false)
    }

    /// A storage field sorted against the client-requested direction
    pub fn reverted(field: impl Into<String>) -> Self {
        Self::new(field, true)
    }
}

/// An unregistered mapping table: output property → storage fields
///
/// ```rust,ignore
/// let mapping = PropertyMapping::new()
///     .property("Id", [SortTarget::field("Id")])
///     .property("Age", [SortTarget::reverted("DateOfBirth")])
///     .property("Name", [SortTarget::field("FirstName"), SortTarget::field("LastName")]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PropertyMapping {
    entries: Vec<(String, Vec<SortTarget>)>,
}

impl PropertyMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map an output property to one or more storage fields, in sort order
    pub fn property(
        mut self,
        name: impl Into<String>,
        targets: impl IntoIterator<Item = SortTarget>,
    ) -> Self {
        self.entries
            .push((name.into(), targets.into_iter().collect()));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, I> FromIterator<(K, I)> for PropertyMapping
where
    K: Into<String>,
    I: IntoIterator<Item = SortTarget>,
{
    fn from_iter<It: IntoIterator<Item = (K, I)>>(iter: It) -> Self {
        iter.into_iter()
            .fold(Self::new(), |mapping, (name, targets)| {
                mapping.property(name, targets)
            })
    }
}

#[derive(Debug, Clone)]
struct MappingEntry {
    property: String,
    targets: Vec<SortTarget>,
}

/// A registered mapping table for one (output, storage) type pair
#[derive(Debug, Clone)]
pub struct MappingTable {
    output_type: &'static str,
    storage_type: &'static str,
    /// Keyed by output property name with ASCII letters lowercased
    entries: HashMap<String, MappingEntry>,
}

impl MappingTable {
    fn build(
        output_type: &'static str,
        storage_type: &'static str,
        mapping: PropertyMapping,
    ) -> Result<Self, ConfigError> {
        let invalid = |message: String| ConfigError::InvalidMapping {
            output_type,
            storage_type,
            message,
        };

        let mut entries = HashMap::with_capacity(mapping.len());
        for (property, targets) in mapping.entries {
            let property = property.trim().to_string();
            if property.is_empty() {
                return Err(invalid("property name must not be blank".to_string()));
            }
            if targets.is_empty() {
                return Err(invalid(format!("property '{}' has no storage fields", property)));
            }
            let key = property.to_ascii_lowercase();
            if entries.contains_key(&key) {
                return Err(invalid(format!("property '{}' is mapped twice", property)));
            }
            entries.insert(key, MappingEntry { property, targets });
        }

        Ok(Self {
            output_type,
            storage_type,
            entries,
        })
    }

    /// Storage fields for an output property, matched ignoring case
    pub fn get(&self, property: &str) -> Option<&[SortTarget]> {
        self.entries
            .get(&property.to_ascii_lowercase())
            .map(|entry| entry.targets.as_slice())
    }

    pub fn contains(&self, property: &str) -> bool {
        self.get(property).is_some()
    }

    /// Registered output property names (canonical casing, unordered)
    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|entry| entry.property.as_str())
    }

    pub fn output_type(&self) -> &'static str {
        self.output_type
    }

    pub fn storage_type(&self) -> &'static str {
        self.storage_type
    }
}

type PairKey = (TypeId, TypeId);

fn pair_key<TOutput: 'static, TStorage: 'static>() -> PairKey {
    (TypeId::of::<TOutput>(), TypeId::of::<TStorage>())
}

/// Setup-time builder of mapping tables
#[derive(Debug, Default)]
pub struct PropertyMappingRegistry {
    tables: HashMap<PairKey, MappingTable>,
}

impl PropertyMappingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the mapping table for the `(TOutput, TStorage)` pair
    ///
    /// # Errors
    ///
    /// [`ConfigError::DuplicateMapping`] if the pair is already registered,
    /// [`ConfigError::InvalidMapping`] for blank, empty or ambiguous entries.
    pub fn register<TOutput: 'static, TStorage: 'static>(
        &mut self,
        mapping: PropertyMapping,
    ) -> Result<&mut Self, ConfigError> {
        let output_type = short_type_name::<TOutput>();
        let storage_type = short_type_name::<TStorage>();
        let key = pair_key::<TOutput, TStorage>();

        if self.tables.contains_key(&key) {
            return Err(ConfigError::DuplicateMapping {
                output_type,
                storage_type,
            });
        }

        let table = MappingTable::build(output_type, storage_type, mapping)?;
        tracing::debug!(
            output_type,
            storage_type,
            properties = table.entries.len(),
            "registered property mapping"
        );
        self.tables.insert(key, table);
        Ok(self)
    }

    /// Freeze the registry; no table can be added afterwards
    pub fn build(self) -> PropertyMappingService {
        PropertyMappingService {
            tables: self.tables,
        }
    }
}

/// Immutable, shareable lookup of registered mapping tables
#[derive(Debug, Default)]
pub struct PropertyMappingService {
    tables: HashMap<PairKey, MappingTable>,
}

impl PropertyMappingService {
    /// Start registering mapping tables
    pub fn builder() -> PropertyMappingRegistry {
        PropertyMappingRegistry::new()
    }

    /// Whether a table exists for the pair
    pub fn is_registered<TOutput: 'static, TStorage: 'static>(&self) -> bool {
        self.tables.contains_key(&pair_key::<TOutput, TStorage>())
    }

    /// The registered table for the pair
    pub fn mapping_for<TOutput: 'static, TStorage: 'static>(
        &self,
    ) -> Result<&MappingTable, LookupError> {
        self.tables
            .get(&pair_key::<TOutput, TStorage>())
            .ok_or_else(|| LookupError::MappingNotRegistered {
                output_type: short_type_name::<TOutput>(),
                storage_type: short_type_name::<TStorage>(),
            })
    }

    /// Check that every clause of `order_by` names a mapped property
    ///
    /// An absent or blank expression requests no ordering and is valid. A
    /// single unknown property invalidates the whole expression. An
    /// unregistered pair is never valid.
    pub fn valid_mapping_exists<TOutput: 'static, TStorage: 'static>(
        &self,
        order_by: Option<&str>,
    ) -> bool {
        let clauses = parse_order_by(order_by);
        if clauses.is_empty() {
            return true;
        }

        let table = match self.mapping_for::<TOutput, TStorage>() {
            Ok(table) => table,
            Err(e) => {
                tracing::warn!(error = %e, "orderBy checked against an unregistered mapping");
                return false;
            }
        };

        match clauses.iter().find(|c| !table.contains(&c.property)) {
            Some(unknown) => {
                tracing::debug!(
                    output_type = table.output_type,
                    property = %unknown.property,
                    "orderBy names an unmapped property"
                );
                false
            }
            None => true,
        }
    }

    /// Translate `order_by` into storage-level sort keys
    ///
    /// Clause order is preserved, then each entry's storage-field order.
    /// A field sorts ascending unless exactly one of "client asked for
    /// descending" and "entry is reverted" holds.
    ///
    /// # Errors
    ///
    /// [`LookupError`] for an unregistered pair or an unmapped property;
    /// callers are expected to run [`Self::valid_mapping_exists`] first.
    pub fn translate<TOutput: 'static, TStorage: 'static>(
        &self,
        order_by: Option<&str>,
    ) -> Result<Vec<SortKey>, LookupError> {
        let clauses = parse_order_by(order_by);
        if clauses.is_empty() {
            return Ok(Vec::new());
        }

        let table = self.mapping_for::<TOutput, TStorage>()?;
        let mut keys = Vec::with_capacity(clauses.len());

        for clause in clauses {
            let targets = table
                .get(&clause.property)
                .ok_or_else(|| LookupError::SortFieldNotMapped {
                    property: clause.property.clone(),
                    output_type: table.output_type,
                })?;

            keys.extend(
                targets
                    .iter()
                    .map(|t| SortKey::new(t.field.clone(), clause.descending == t.revert)),
            );
        }

        Ok(keys)
    }
}
