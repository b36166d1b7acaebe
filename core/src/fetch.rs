//! The record-set fetch instruction handed to the host's query layer.

use crate::ordering::Ordering;
use crate::planner::EagerLoadSet;

/// What the host should fetch for one change-list page: the model, the
/// relations to load alongside the rows, and the ordering.
///
/// Adding relations is idempotent, so merging the same eager-load set twice
/// leaves the plan unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchPlan {
    model: &'static str,
    select_related: EagerLoadSet,
    ordering: Vec<Ordering>,
}

impl FetchPlan {
    pub fn new(model: &'static str) -> Self {
        Self {
            model,
            select_related: EagerLoadSet::new(),
            ordering: Vec::new(),
        }
    }

    /// Adds relation paths to load together with the rows.
    pub fn select_related<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for path in paths {
            self.select_related.insert(path.as_ref());
        }
        self
    }

    /// Appends an ordering term; terms apply in the order they were added.
    pub fn order_by(mut self, ordering: Ordering) -> Self {
        self.ordering.push(ordering);
        self
    }

    pub fn model(&self) -> &'static str {
        self.model
    }

    pub fn related(&self) -> &EagerLoadSet {
        &self.select_related
    }

    pub fn ordering(&self) -> &[Ordering] {
        &self.ordering
    }
}
