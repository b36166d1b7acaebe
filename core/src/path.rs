//! Relation paths such as `event__room__name`.

use compact_str::CompactString;
use core::fmt;
use smallvec::SmallVec;

use crate::error::{RelatedFieldError, Result};

/// Joins relation names in a path.
pub const SEPARATOR: &str = "__";

/// Returns true if `name` follows at least one relation.
#[inline]
pub fn is_relation_path(name: &str) -> bool {
    name.contains(SEPARATOR)
}

/// Splits off the final segment of `name`, returning the path to the last
/// relation it traverses (`event__room__name` -> `event__room`).
#[inline]
pub fn relation_prefix(name: &str) -> Option<&str> {
    name.rsplit_once(SEPARATOR).map(|(prefix, _)| prefix)
}

/// A parsed relation path with at least two non-empty segments.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RelationPath {
    segments: SmallVec<[CompactString; 4]>,
}

impl RelationPath {
    /// Parses a `__`-joined path.
    ///
    /// Single-segment names are plain fields and never need a resolver, so
    /// they are rejected here along with empty segments (`event__`, `a____b`).
    pub fn parse(name: &str) -> Result<Self> {
        let segments: SmallVec<[CompactString; 4]> =
            name.split(SEPARATOR).map(CompactString::from).collect();

        if segments.len() < 2 {
            return Err(RelatedFieldError::Configuration(format!(
                "`{name}` is not a relation path, expected names joined by `{SEPARATOR}`"
            )));
        }

        if let Some(position) = segments.iter().position(|segment| segment.is_empty()) {
            return Err(RelatedFieldError::Configuration(format!(
                "relation path `{name}` has an empty segment at position {position}"
            )));
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[CompactString] {
        &self.segments
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// The relation read from the root object.
    pub fn first(&self) -> &str {
        &self.segments[0]
    }

    /// The attribute read from the last related object.
    pub fn leaf(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    /// The path minus its final segment, re-joined with the separator.
    pub fn prefix(&self) -> CompactString {
        join(&self.segments[..self.segments.len() - 1])
    }

    /// Every relation prefix of this path, shortest first
    /// (`a__b__c` -> `a`, `a__b`).
    pub fn relations(&self) -> impl Iterator<Item = CompactString> + '_ {
        (1..self.segments.len()).map(|end| join(&self.segments[..end]))
    }
}

fn join(segments: &[CompactString]) -> CompactString {
    let mut out = CompactString::default();
    for (idx, segment) in segments.iter().enumerate() {
        if idx > 0 {
            out.push_str(SEPARATOR);
        }
        out.push_str(segment);
    }
    out
}

impl fmt::Display for RelationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join(&self.segments))
    }
}

impl core::str::FromStr for RelationPath {
    type Err = RelatedFieldError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
