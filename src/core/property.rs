//! Property descriptor tables and the process-wide descriptor cache
//!
//! A [`Shapeable`] type lists its public properties once, as a table of
//! canonical names and typed accessors. The table is built lazily on first
//! use and cached per type for the lifetime of the process, so resolving
//! field names never repeats per record.

use crate::core::error::LookupError;
use crate::core::field::FieldValue;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Reads one property of `T` as a [`FieldValue`]
pub type Accessor<T> = fn(&T) -> FieldValue;

/// A named, typed accessor for one property of `T`
pub struct PropertyDescriptor<T> {
    name: &'static str,
    accessor: Accessor<T>,
}

impl<T> PropertyDescriptor<T> {
    /// Create a descriptor from a canonical name and an accessor
    pub const fn new(name: &'static str, accessor: Accessor<T>) -> Self {
        Self { name, accessor }
    }

    /// The property name as declared (canonical casing)
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Read this property from `item`
    pub fn value_of(&self, item: &T) -> FieldValue {
        (self.accessor)(item)
    }
}

impl<T> Clone for PropertyDescriptor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PropertyDescriptor<T> {}

impl<T> fmt::Debug for PropertyDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .finish()
    }
}

/// Types whose public properties can be shaped and sorted on
///
/// Implementations are usually generated with
/// [`impl_shapeable!`](crate::impl_shapeable).
pub trait Shapeable: Sized + 'static {
    /// List every public property in declaration order
    ///
    /// Called at most once per process in normal operation; use
    /// [`Shapeable::property_table`] to read the cached table.
    fn describe_properties() -> Vec<PropertyDescriptor<Self>>;

    /// The cached property table for this type
    fn property_table() -> Arc<PropertyTable<Self>> {
        PropertyInfoCache::global().table_for::<Self>()
    }
}

/// The ordered descriptor list of one type
#[derive(Debug)]
pub struct PropertyTable<T> {
    type_name: &'static str,
    descriptors: Vec<PropertyDescriptor<T>>,
}

impl<T: 'static> PropertyTable<T> {
    /// Build a table from descriptors in declaration order
    pub fn new(descriptors: Vec<PropertyDescriptor<T>>) -> Self {
        Self {
            type_name: short_type_name::<T>(),
            descriptors,
        }
    }

    /// Short name of the described type, used in error messages
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// All descriptors in declaration order
    pub fn all(&self) -> &[PropertyDescriptor<T>] {
        &self.descriptors
    }

    /// Find a property by case-insensitive exact name
    pub fn find(&self, name: &str) -> Option<&PropertyDescriptor<T>> {
        self.descriptors
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
    }

    /// Read a property of `item` by name
    pub fn value_of(&self, item: &T, name: &str) -> Option<FieldValue> {
        self.find(name).map(|d| d.value_of(item))
    }

    /// Resolve a comma-separated field list against this table
    ///
    /// An absent or blank list resolves to every property in declaration
    /// order. Otherwise each token is trimmed and matched ignoring case, in
    /// request order; the first unknown token fails the whole list.
    pub fn resolve(
        &self,
        fields: Option<&str>,
    ) -> Result<Vec<&PropertyDescriptor<T>>, LookupError> {
        let Some(fields) = fields.filter(|f| !f.trim().is_empty()) else {
            return Ok(self.descriptors.iter().collect());
        };

        fields
            .split(',')
            .map(str::trim)
            .map(|name| {
                self.find(name).ok_or_else(|| LookupError::PropertyNotFound {
                    property: name.to_string(),
                    type_name: self.type_name,
                })
            })
            .collect()
    }
}

/// Process-wide cache of property tables keyed by type
///
/// Population is convergent: concurrent first uses may each build a table,
/// but only the first insert is kept and every caller gets that one.
#[derive(Default)]
pub struct PropertyInfoCache {
    tables: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl PropertyInfoCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// The cache shared by the whole process
    pub fn global() -> &'static PropertyInfoCache {
        static CACHE: OnceLock<PropertyInfoCache> = OnceLock::new();
        CACHE.get_or_init(PropertyInfoCache::new)
    }

    /// Get the table for `T`, building it on first use
    pub fn table_for<T: Shapeable>(&self) -> Arc<PropertyTable<T>> {
        let key = TypeId::of::<T>();

        let cached = self
            .tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned();
        if let Some(table) = cached.and_then(|entry| entry.downcast().ok()) {
            return table;
        }

        let built = Arc::new(PropertyTable::new(T::describe_properties()));
        tracing::debug!(
            type_name = built.type_name(),
            properties = built.all().len(),
            "caching property table"
        );

        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        let entry = tables
            .entry(key)
            .or_insert_with(|| built.clone() as Arc<dyn Any + Send + Sync>)
            .clone();
        entry.downcast().unwrap_or(built)
    }

    /// Number of cached tables
    pub fn len(&self) -> usize {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no table has been cached yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for PropertyInfoCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyInfoCache")
            .field("tables", &self.len())
            .finish()
    }
}

/// Last path segment of a type name (`course_library::entities::AuthorDto` → `AuthorDto`)
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    match base.rfind("::") {
        Some(idx) => &full[idx + 2..],
        None => full,
    }
}
