//! Eager-load planning for change-list queries.
//!
//! Every relation a display column walks should be fetched together with the
//! rows, otherwise rendering a page costs one extra fetch per related object
//! per row. The planner derives those relations from the display field list;
//! it is cheap and runs on every query build, so nothing here is cached.

use compact_str::CompactString;
use std::collections::BTreeSet;

use crate::model::ModelDescriptor;
use crate::path::{RelationPath, is_relation_path, relation_prefix};

/// Deduplicated relation paths to load alongside the rows, in sorted order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EagerLoadSet {
    paths: BTreeSet<CompactString>,
}

impl EagerLoadSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a path, returning false if it was already present.
    pub fn insert(&mut self, path: impl Into<CompactString>) -> bool {
        self.paths.insert(path.into())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(CompactString::as_str)
    }

    /// Every relation that must be joined, with intermediate hops spelled out
    /// (`event__room` needs `event` and `event__room`).
    pub fn joins(&self) -> BTreeSet<CompactString> {
        let mut joins = BTreeSet::new();
        for path in &self.paths {
            if let Ok(parsed) = RelationPath::parse(path) {
                joins.extend(parsed.relations());
            }
            joins.insert(path.clone());
        }
        joins
    }
}

impl<S: Into<CompactString>> FromIterator<S> for EagerLoadSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<CompactString>> Extend<S> for EagerLoadSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.paths.extend(iter.into_iter().map(Into::into));
    }
}

impl<'a> IntoIterator for &'a EagerLoadSet {
    type Item = &'a CompactString;
    type IntoIter = std::collections::btree_set::Iter<'a, CompactString>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

/// Computes the relations to eagerly load for `display_fields` on `model`.
///
/// - a relation path contributes the path to its last relation
///   (`event__room__name` -> `event__room`);
/// - a field of `model` that is a to-one relation contributes itself;
/// - anything else is a computed column and is ignored.
pub fn plan_eager_load<I, S>(display_fields: I, model: &ModelDescriptor) -> EagerLoadSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut set = EagerLoadSet::new();

    for field in display_fields {
        let field = field.as_ref();

        if is_relation_path(field) {
            if let Some(prefix) = relation_prefix(field) {
                set.insert(prefix);
            }
            continue;
        }

        if model
            .get_field(field)
            .is_some_and(|descriptor| descriptor.kind.is_to_one())
        {
            set.insert(field);
        }
    }

    set
}
