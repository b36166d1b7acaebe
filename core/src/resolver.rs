//! Resolvers that read a value through a chain of relations.
//!
//! A [`Resolver`] is built once per column from a `__`-joined path and then
//! invoked for every row. It carries the column's sort key and header label so
//! the change list can order and title the column without knowing it walks
//! relations.

use compact_str::CompactString;
use core::fmt;
use heck::ToTitleCase;
use std::sync::Arc;

use crate::error::{RelatedFieldError, ResolutionFailure, Result};
use crate::path::RelationPath;
use crate::value::{Record, Value};

/// Formats the leaf value of a resolved path for display.
pub type FormatFn = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Walks a relation path over a row and formats the leaf value.
#[derive(Clone)]
pub struct Resolver {
    name: CompactString,
    path: RelationPath,
    format: Option<FormatFn>,
    sort_key: CompactString,
    label: CompactString,
}

impl Resolver {
    /// Builds a resolver with the default sort key and label.
    pub fn new(name: &str) -> Result<Self> {
        Self::builder(name).build()
    }

    pub fn builder(name: impl Into<CompactString>) -> ResolverBuilder {
        ResolverBuilder {
            name: name.into(),
            format: None,
            sort_key: None,
            label: None,
        }
    }

    /// The path as it was written (`event__room__name`).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &RelationPath {
        &self.path
    }

    /// Key handed to the ordering layer when this column is sorted.
    pub fn sort_key(&self) -> &str {
        &self.sort_key
    }

    /// Column header.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Reads the path from `root` and applies the format function.
    ///
    /// A null leaf is a valid value and is handed to the format function. A
    /// null or non-object value before the leaf fails, as does any segment the
    /// object does not have.
    pub fn resolve(&self, root: &dyn Record) -> Result<Value> {
        let mut current: Option<Value> = None;

        for segment in self.path.segments() {
            let next = {
                let record = match &current {
                    None => root,
                    Some(Value::Record(record)) => record.as_ref(),
                    Some(Value::Null) => return Err(self.failure(segment, ResolutionFailure::Null)),
                    Some(_) => return Err(self.failure(segment, ResolutionFailure::NotARecord)),
                };
                record
                    .attribute(segment)
                    .ok_or_else(|| self.failure(segment, ResolutionFailure::Missing))?
            };
            current = Some(next);
        }

        let leaf = current.unwrap_or_default();
        Ok(match &self.format {
            Some(format) => format(leaf),
            None => leaf,
        })
    }

    fn failure(&self, segment: &CompactString, reason: ResolutionFailure) -> RelatedFieldError {
        RelatedFieldError::AttributeResolution {
            path: self.name.clone(),
            segment: segment.clone(),
            reason,
        }
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("name", &self.name)
            .field("sort_key", &self.sort_key)
            .field("label", &self.label)
            .field("format", &self.format.is_some())
            .finish()
    }
}

/// Builder for a [`Resolver`] with a custom format function, sort key or label.
///
/// ```ignore
/// let date = Resolver::builder("event__date")
///     .label("Event date")
///     .format(|value| value.as_str().map(|d| d[..10].into()).unwrap_or(value))
///     .build()?;
/// ```
pub struct ResolverBuilder {
    name: CompactString,
    format: Option<FormatFn>,
    sort_key: Option<CompactString>,
    label: Option<CompactString>,
}

impl ResolverBuilder {
    pub fn format<F>(mut self, format: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.format = Some(Arc::new(format));
        self
    }

    pub fn format_fn(mut self, format: Option<FormatFn>) -> Self {
        self.format = format;
        self
    }

    pub fn sort_key(mut self, sort_key: impl Into<CompactString>) -> Self {
        self.sort_key = Some(sort_key.into());
        self
    }

    pub fn label(mut self, label: impl Into<CompactString>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn build(self) -> Result<Resolver> {
        let path = RelationPath::parse(&self.name)?;
        let label = self.label.unwrap_or_else(|| label_for(path.leaf()));
        let sort_key = self.sort_key.unwrap_or_else(|| self.name.clone());

        crate::relfield_trace_build!(self.name, label, "builder");

        Ok(Resolver {
            name: self.name,
            path,
            format: self.format,
            sort_key,
            label,
        })
    }
}

/// Builds a resolver for `path_name`.
///
/// `sort_key` defaults to `path_name` and `label` to the last segment
/// title-cased (`event__room_name` -> `Room Name`).
pub fn make_resolver(
    path_name: &str,
    format: Option<FormatFn>,
    sort_key: Option<&str>,
    label: Option<&str>,
) -> Result<Resolver> {
    let mut builder = Resolver::builder(path_name).format_fn(format);
    if let Some(sort_key) = sort_key {
        builder = builder.sort_key(sort_key);
    }
    if let Some(label) = label {
        builder = builder.label(label);
    }
    builder.build()
}

/// Header text for a field name: `room_name` -> `Room Name`.
///
/// Words split on underscores and on lower-to-upper case changes, and a word
/// starting with digits keeps the rest lowercase (`roomName` -> `Room Name`,
/// `2nd_floor` -> `2nd Floor`).
pub fn label_for(name: &str) -> CompactString {
    CompactString::from(name.to_title_case())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Object;

    fn banquet() -> Object {
        let room = Object::new("Room").with("name", "Hall A").with("capacity", 120i32);
        let event = Object::new("Event")
            .with("date", "2024-05-01")
            .with("room", room)
            .with("organizer", None::<&str>);
        Object::new("Banquet").with("event", event).with("start_time", "18:00")
    }

    #[test]
    fn resolves_each_segment_in_order() {
        let resolver = Resolver::new("event__room__name").unwrap();
        assert_eq!(resolver.resolve(&banquet()).unwrap(), Value::from("Hall A"));
    }

    #[test]
    fn applies_format_to_the_leaf() {
        let resolver = Resolver::builder("event__room__capacity")
            .format(|value| Value::from(format!("{value} seats")))
            .build()
            .unwrap();
        assert_eq!(resolver.resolve(&banquet()).unwrap(), Value::from("120 seats"));
    }

    #[test]
    fn label_defaults_to_title_cased_leaf() {
        let resolver = make_resolver("event__room_name", None, None, None).unwrap();
        assert_eq!(resolver.label(), "Room Name");

        let resolver = make_resolver("event__room_name", None, None, Some("Room")).unwrap();
        assert_eq!(resolver.label(), "Room");
    }

    #[test]
    fn label_word_boundaries() {
        assert_eq!(label_for("room_name"), "Room Name");
        assert_eq!(label_for("roomName"), "Room Name");
        assert_eq!(label_for("2nd_floor"), "2nd Floor");
        assert_eq!(label_for("name"), "Name");
    }

    #[test]
    fn sort_key_defaults_to_path() {
        let resolver = make_resolver("a__b__c", None, None, None).unwrap();
        assert_eq!(resolver.sort_key(), "a__b__c");

        let resolver = make_resolver("a__b__c", None, Some("x"), None).unwrap();
        assert_eq!(resolver.sort_key(), "x");
    }

    #[test]
    fn single_segment_is_rejected() {
        let err = make_resolver("a", None, None, None).unwrap_err();
        assert!(matches!(err, RelatedFieldError::Configuration(_)));
    }

    #[test]
    fn null_intermediate_fails_instead_of_defaulting() {
        let resolver = Resolver::new("event__organizer__name").unwrap();
        let err = resolver.resolve(&banquet()).unwrap_err();
        match err {
            RelatedFieldError::AttributeResolution { path, segment, reason } => {
                assert_eq!(path, "event__organizer__name");
                assert_eq!(segment, "name");
                assert_eq!(reason, ResolutionFailure::Null);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn null_leaf_is_a_value() {
        let resolver = Resolver::builder("event__organizer")
            .format(|value| if value.is_null() { Value::from("-") } else { value })
            .build()
            .unwrap();
        assert_eq!(resolver.resolve(&banquet()).unwrap(), Value::from("-"));
    }

    #[test]
    fn missing_attribute_and_scalar_hops_fail() {
        let missing = Resolver::new("event__venue").unwrap().resolve(&banquet()).unwrap_err();
        assert!(matches!(
            missing,
            RelatedFieldError::AttributeResolution { reason: ResolutionFailure::Missing, .. }
        ));

        let scalar = Resolver::new("start_time__hour").unwrap().resolve(&banquet()).unwrap_err();
        assert!(matches!(
            scalar,
            RelatedFieldError::AttributeResolution { reason: ResolutionFailure::NotARecord, .. }
        ));
    }
}
