//! Change-list column configuration.
//!
//! [`ListDisplay`] is what a change list consults to title, sort, render and
//! fetch its columns. Columns are either fields of the model or relation paths
//! resolved through the [`ResolverCache`].

use compact_str::CompactString;
use std::sync::Arc;

use crate::cache::ResolverCache;
use crate::error::{RelatedFieldError, ResolutionFailure, Result};
use crate::fetch::FetchPlan;
use crate::model::{FieldDescriptor, ModelDescriptor};
use crate::ordering::Ordering;
use crate::path::{RelationPath, is_relation_path};
use crate::planner::plan_eager_load;
use crate::resolver::{Resolver, label_for};
use crate::value::{Record, Value};

/// How a column gets its value.
#[derive(Clone, Debug)]
pub enum Column {
    /// Declared resolver or relation path
    Related(Arc<Resolver>),
    /// Field read directly from the row
    Field(&'static FieldDescriptor),
}

impl Column {
    pub fn label(&self) -> CompactString {
        match self {
            Self::Related(resolver) => CompactString::from(resolver.label()),
            Self::Field(field) => label_for(field.name),
        }
    }

    pub fn sort_key(&self) -> CompactString {
        match self {
            Self::Related(resolver) => CompactString::from(resolver.sort_key()),
            Self::Field(field) => CompactString::from(field.name),
        }
    }

    pub fn value(&self, row: &dyn Record) -> Result<Value> {
        match self {
            Self::Related(resolver) => resolver.resolve(row),
            Self::Field(field) => {
                row.attribute(field.name)
                    .ok_or_else(|| RelatedFieldError::AttributeResolution {
                        path: CompactString::from(field.name),
                        segment: CompactString::from(field.name),
                        reason: ResolutionFailure::Missing,
                    })
            }
        }
    }
}

/// Display configuration for one model's change list.
#[derive(Debug)]
pub struct ListDisplay {
    model: &'static ModelDescriptor,
    display_fields: Vec<CompactString>,
    select_related: Vec<CompactString>,
    resolvers: ResolverCache,
}

impl ListDisplay {
    pub fn new<I, S>(model: &'static ModelDescriptor, display_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CompactString>,
    {
        Self {
            model,
            display_fields: display_fields.into_iter().map(Into::into).collect(),
            select_related: Vec::new(),
            resolvers: ResolverCache::new(),
        }
    }

    /// Extra relation paths to load regardless of the display fields.
    pub fn with_select_related<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CompactString>,
    {
        self.select_related.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Declares a customised column under the resolver's own path name.
    pub fn declare(self, resolver: Resolver) -> Self {
        let name = CompactString::from(resolver.name());
        self.declare_as(name, resolver)
    }

    /// Declares a customised column under `column`, which may differ from the
    /// path the resolver walks (`client_name` reading `client__name`).
    pub fn declare_as(self, column: impl Into<CompactString>, resolver: Resolver) -> Self {
        self.resolvers.declare(column, resolver);
        self
    }

    pub fn model(&self) -> &'static ModelDescriptor {
        self.model
    }

    pub fn display_fields(&self) -> &[CompactString] {
        &self.display_fields
    }

    pub fn resolvers(&self) -> &ResolverCache {
        &self.resolvers
    }

    /// Finds how column `name` is read.
    ///
    /// Declared resolvers come first, then relation paths, then fields of the
    /// model.
    pub fn column(&self, name: &str) -> Result<Column> {
        if let Some(resolver) = self.resolvers.get(name)? {
            return Ok(Column::Related(resolver));
        }

        self.model
            .get_field(name)
            .map(Column::Field)
            .ok_or_else(|| RelatedFieldError::UnknownColumn(name.to_string()))
    }

    /// Checks every display field up front, building the resolvers for
    /// relation paths so misconfigured paths fail here rather than per row.
    pub fn validate(&self) -> Result<()> {
        for name in &self.display_fields {
            if let Some(resolver) = self.resolvers.lookup(name) {
                self.check_relation(name, resolver.path().first())?;
                continue;
            }

            if is_relation_path(name) {
                let path = RelationPath::parse(name)?;
                self.check_relation(name, path.first())?;
                self.resolvers.get(name)?;
                continue;
            }

            if self.model.get_field(name).is_none() {
                return Err(RelatedFieldError::Configuration(format!(
                    "`{name}` in display fields is neither a field of `{}` nor a relation path",
                    self.model.name
                )));
            }
        }

        for path in &self.select_related {
            let first = path.split(crate::path::SEPARATOR).next().unwrap_or_default();
            self.check_relation(path, first)?;
        }

        Ok(())
    }

    fn check_relation(&self, name: &str, first: &str) -> Result<()> {
        match self.model.get_field(first) {
            Some(field) if field.kind.is_to_one() => Ok(()),
            Some(_) => Err(RelatedFieldError::Configuration(format!(
                "`{name}` starts at `{first}`, which is not a to-one relation of `{}`",
                self.model.name
            ))),
            None => Err(RelatedFieldError::Configuration(format!(
                "`{name}` starts at `{first}`, which is not a field of `{}`",
                self.model.name
            ))),
        }
    }

    /// Column header for `name`.
    pub fn header(&self, name: &str) -> Result<CompactString> {
        Ok(self.column(name)?.label())
    }

    pub fn headers(&self) -> Result<Vec<CompactString>> {
        self.display_fields.iter().map(|name| self.header(name)).collect()
    }

    /// Key the ordering layer sorts by when column `name` is clicked.
    pub fn sort_key(&self, name: &str) -> Result<CompactString> {
        Ok(self.column(name)?.sort_key())
    }

    /// Value of column `name` for one row. Resolution failures are returned
    /// as-is; deciding what an unreadable cell shows is up to the caller.
    pub fn display_value(&self, name: &str, row: &dyn Record) -> Result<Value> {
        self.column(name)?.value(row)
    }

    /// One value per display field, in display order.
    pub fn render_row(&self, row: &dyn Record) -> Result<Vec<Value>> {
        self.display_fields
            .iter()
            .map(|name| self.display_value(name, row))
            .collect()
    }

    /// Adds the relations the display fields traverse to `plan`, including
    /// those walked by columns declared under a name of their own.
    ///
    /// The eager-load set is recomputed on every call.
    pub fn queryset(&self, plan: FetchPlan) -> FetchPlan {
        let mut related = plan_eager_load(&self.display_fields, self.model);
        for name in &self.display_fields {
            if let Some(resolver) = self.resolvers.lookup(name) {
                related.insert(resolver.path().prefix());
            }
        }
        related.extend(self.select_related.iter().cloned());

        crate::relfield_trace_plan!(plan.model(), related);

        plan.select_related(&related)
    }

    /// Turns a sort request on a display column (`event__date`,
    /// `-event__date`) into an ordering on that column's sort key.
    pub fn order_by(&self, param: &str) -> Result<Ordering> {
        let requested = Ordering::parse(param)?;
        let column = requested.field();

        if !self.display_fields.iter().any(|name| name == column) {
            return Err(RelatedFieldError::UnknownColumn(column.to_string()));
        }

        let sort_key = self.sort_key(column)?;
        Ok(Ordering::new(sort_key, requested.direction()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldKind;
    use crate::ordering::OrderBy;
    use crate::value::Object;

    static BANQUET: ModelDescriptor = ModelDescriptor::new(
        "Banquet",
        &[
            FieldDescriptor::scalar("id"),
            FieldDescriptor::foreign_key("event", "Event"),
            FieldDescriptor::new("guests", FieldKind::ManyToMany { target: "Person" }),
            FieldDescriptor::scalar("start_time"),
            FieldDescriptor::scalar("end_time"),
        ],
    );

    fn list() -> ListDisplay {
        ListDisplay::new(&BANQUET, ["event__date", "event__room", "start_time", "end_time"])
    }

    fn row() -> Object {
        let room = Object::new("Room").with_display("Hall A").with("name", "Hall A");
        let event = Object::new("Event").with("date", "2024-05-01").with("room", room);
        Object::new("Banquet")
            .with("event", event)
            .with("start_time", "18:00")
            .with("end_time", "23:00")
    }

    #[test]
    fn renders_related_and_direct_columns() {
        let list = list();
        let cells: Vec<String> = list
            .render_row(&row())
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(cells, ["2024-05-01", "Hall A", "18:00", "23:00"]);
        assert_eq!(
            list.headers().unwrap(),
            ["Date", "Room", "Start Time", "End Time"]
        );
    }

    #[test]
    fn queryset_adds_traversed_relations_once() {
        let list = list();
        let plan = list.queryset(FetchPlan::new("Banquet"));
        let plan = list.queryset(plan);
        assert_eq!(plan.related().iter().collect::<Vec<_>>(), ["event"]);
    }

    #[test]
    fn queryset_includes_configured_select_related() {
        let list = list().with_select_related(["event__room"]);
        let plan = list.queryset(FetchPlan::new("Banquet"));
        assert_eq!(plan.related().iter().collect::<Vec<_>>(), ["event", "event__room"]);
    }

    #[test]
    fn validate_rejects_unknown_columns() {
        let list = ListDisplay::new(&BANQUET, ["event__date", "venue"]);
        assert!(matches!(
            list.validate(),
            Err(RelatedFieldError::Configuration(_))
        ));
    }

    #[test]
    fn validate_rejects_paths_through_collections() {
        let list = ListDisplay::new(&BANQUET, ["guests__name"]);
        assert!(list.validate().is_err());

        let list = ListDisplay::new(&BANQUET, ["start_time__hour"]);
        assert!(list.validate().is_err());
    }

    #[test]
    fn validate_builds_relation_resolvers() {
        let list = list();
        list.validate().unwrap();
        assert!(list.resolvers().contains("event__date"));
        assert!(list.resolvers().contains("event__room"));
        assert!(!list.resolvers().contains("start_time"));
    }

    #[test]
    fn validate_does_not_depend_on_earlier_lookups() {
        let list = ListDisplay::new(&BANQUET, ["guests__name"]);
        list.headers().unwrap();
        assert!(list.resolvers().contains("guests__name"));
        assert!(matches!(
            list.validate(),
            Err(RelatedFieldError::Configuration(_))
        ));
    }

    #[test]
    fn validate_checks_declared_paths() {
        let list = ListDisplay::new(&BANQUET, ["guest_names"])
            .declare_as("guest_names", Resolver::new("guests__name").unwrap());
        assert!(matches!(
            list.validate(),
            Err(RelatedFieldError::Configuration(_))
        ));

        let list = ListDisplay::new(&BANQUET, ["room_name"])
            .declare_as("room_name", Resolver::new("event__room__name").unwrap());
        list.validate().unwrap();
    }

    #[test]
    fn queryset_follows_declared_paths() {
        let list = ListDisplay::new(&BANQUET, ["room_name", "start_time"])
            .declare_as("room_name", Resolver::new("event__room__name").unwrap());
        let plan = list.queryset(FetchPlan::new("Banquet"));
        assert_eq!(plan.related().iter().collect::<Vec<_>>(), ["event__room"]);
    }

    #[test]
    fn declared_columns_override_defaults() {
        let list = list().declare(
            Resolver::builder("event__date")
                .label("Event date")
                .sort_key("event__starts_at")
                .build()
                .unwrap(),
        );
        assert_eq!(list.header("event__date").unwrap(), "Event date");
        assert_eq!(list.sort_key("event__date").unwrap(), "event__starts_at");
        assert_eq!(list.sort_key("start_time").unwrap(), "start_time");
    }

    #[test]
    fn order_by_uses_the_column_sort_key() {
        let list = list();
        let ordering = list.order_by("-event__date").unwrap();
        assert_eq!(ordering.field(), "event__date");
        assert_eq!(ordering.direction(), OrderBy::Desc);
        assert_eq!(ordering.relation(), Some("event"));

        assert!(matches!(
            list.order_by("event__capacity"),
            Err(RelatedFieldError::UnknownColumn(_))
        ));
    }

    #[test]
    fn unknown_columns_are_reported() {
        let list = list();
        assert!(matches!(
            list.display_value("venue", &row()),
            Err(RelatedFieldError::UnknownColumn(_))
        ));
    }

    #[test]
    fn missing_direct_attribute_is_a_resolution_error() {
        let list = list();
        let row = Object::new("Banquet");
        let err = list.display_value("start_time", &row).unwrap_err();
        assert!(err.is_attribute_resolution());
    }
}
