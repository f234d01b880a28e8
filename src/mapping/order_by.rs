//! Parsing of client-supplied `orderBy` expressions

use serde::Serialize;

/// One `property[ asc|desc]` unit of an `orderBy` expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderingClause {
    /// Bare property name, trimmed, original casing
    pub property: String,
    /// Whether the client asked for descending order
    pub descending: bool,
}

impl OrderingClause {
    /// Parse one clause
    ///
    /// Trims the clause and strips a trailing ` desc` or ` asc` (any case).
    /// Anything else stays part of the property name.
    pub fn parse(clause: &str) -> Self {
        let trimmed = clause.trim();

        if let Some(property) = strip_suffix_ignore_case(trimmed, " desc") {
            return Self {
                property: property.trim_end().to_string(),
                descending: true,
            };
        }

        let property = strip_suffix_ignore_case(trimmed, " asc").unwrap_or(trimmed);
        Self {
            property: property.trim_end().to_string(),
            descending: false,
        }
    }
}

/// Split an `orderBy` expression into clauses
///
/// An absent or blank expression means no ordering and yields no clauses.
/// Duplicate clauses are kept as given.
pub fn parse_order_by(order_by: Option<&str>) -> Vec<OrderingClause> {
    match order_by {
        Some(expr) if !expr.trim().is_empty() => {
            expr.split(',').map(OrderingClause::parse).collect()
        }
        _ => Vec::new(),
    }
}

/// One unit of translated storage ordering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortKey {
    /// Storage field name
    pub field: String,
    /// Effective direction at the storage level
    pub ascending: bool,
}

impl SortKey {
    pub fn new(field: impl Into<String>, ascending: bool) -> Self {
        Self {
            field: field.into(),
            ascending,
        }
    }
}

fn strip_suffix_ignore_case<'a>(value: &'a str, suffix: &str) -> Option<&'a str> {
    let split = value.len().checked_sub(suffix.len())?;
    let tail = value.get(split..)?;
    tail.eq_ignore_ascii_case(suffix).then(|| &value[..split])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clause(property: &str, descending: bool) -> OrderingClause {
        OrderingClause {
            property: property.to_string(),
            descending,
        }
    }

    #[test]
    fn test_parse_bare_property() {
        assert_eq!(OrderingClause::parse("name"), clause("name", false));
        assert_eq!(OrderingClause::parse("  Name  "), clause("Name", false));
    }

    #[test]
    fn test_parse_direction_suffix_any_case() {
        assert_eq!(OrderingClause::parse("age desc"), clause("age", true));
        assert_eq!(OrderingClause::parse("age DESC"), clause("age", true));
        assert_eq!(OrderingClause::parse("age Asc"), clause("age", false));
        assert_eq!(OrderingClause::parse("age   desc"), clause("age", true));
    }

    #[test]
    fn test_parse_unknown_suffix_stays_in_name() {
        assert_eq!(OrderingClause::parse("age downward"), clause("age downward", false));
    }

    #[test]
    fn test_parse_property_named_like_direction() {
        assert_eq!(OrderingClause::parse("desc"), clause("desc", false));
        assert_eq!(OrderingClause::parse("description"), clause("description", false));
    }

    #[test]
    fn test_parse_order_by_blank() {
        assert!(parse_order_by(None).is_empty());
        assert!(parse_order_by(Some("")).is_empty());
        assert!(parse_order_by(Some("  \t ")).is_empty());
    }

    #[test]
    fn test_parse_order_by_keeps_order_and_duplicates() {
        let clauses = parse_order_by(Some("name desc, age,name"));
        assert_eq!(
            clauses,
            vec![clause("name", true), clause("age", false), clause("name", false)]
        );
    }

    #[test]
    fn test_parse_order_by_empty_clause() {
        let clauses = parse_order_by(Some("name,,age"));
        assert_eq!(clauses[1], clause("", false));
    }

    #[test]
    fn test_strip_suffix_non_ascii_boundary() {
        assert_eq!(strip_suffix_ignore_case("é", " desc"), None);
        assert_eq!(OrderingClause::parse("prénom desc"), clause("prénom", true));
    }
}
