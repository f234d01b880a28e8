//! Whitelisted translation of client sort expressions
//!
//! A mapping table associates each client-facing property of an output type
//! with one or more storage fields and a per-field direction flag. Client
//! `orderBy` strings are validated against the table and translated into
//! storage-level [`SortKey`]s; nothing the client sends reaches the store
//! without passing through a registered entry.

pub mod order_by;
pub mod service;

pub use order_by::{OrderingClause, SortKey, parse_order_by};
pub use service::{
    MappingTable, PropertyMapping, PropertyMappingRegistry, PropertyMappingService, SortTarget,
};
