//! Sort directions and ordering terms for change-list fetches.

use compact_str::CompactString;
use core::fmt;

use crate::error::{RelatedFieldError, Result};
use crate::path::relation_prefix;

/// Sort direction for ORDER BY clauses
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrderBy {
    #[default]
    Asc,
    Desc,
}

impl OrderBy {
    pub const fn reverse(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// One ordering term of a fetch, keyed by a field or relation path.
///
/// Written `event__date` (ascending) or `-event__date` (descending), matching
/// how change-list sort requests and sort keys are spelled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ordering {
    field: CompactString,
    direction: OrderBy,
}

impl Ordering {
    pub fn new(field: impl Into<CompactString>, direction: OrderBy) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Creates an ascending ordering: "field"
    pub fn asc(field: impl Into<CompactString>) -> Self {
        Self::new(field, OrderBy::Asc)
    }

    /// Creates a descending ordering: "-field"
    pub fn desc(field: impl Into<CompactString>) -> Self {
        Self::new(field, OrderBy::Desc)
    }

    /// Parses `field`, `+field` or `-field`.
    pub fn parse(param: &str) -> Result<Self> {
        let (direction, field) = match param.as_bytes().first() {
            Some(b'-') => (OrderBy::Desc, &param[1..]),
            Some(b'+') => (OrderBy::Asc, &param[1..]),
            _ => (OrderBy::Asc, param),
        };

        if field.is_empty() {
            return Err(RelatedFieldError::Configuration(format!(
                "invalid ordering `{param}`: missing field name"
            )));
        }

        Ok(Self::new(field, direction))
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn direction(&self) -> OrderBy {
        self.direction
    }

    /// Relation the ordering joins through, if the field is a relation path.
    pub fn relation(&self) -> Option<&str> {
        relation_prefix(&self.field)
    }

    pub fn reversed(&self) -> Self {
        Self::new(self.field.clone(), self.direction.reverse())
    }
}

impl fmt::Display for Ordering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.direction == OrderBy::Desc {
            f.write_str("-")?;
        }
        f.write_str(&self.field)
    }
}
