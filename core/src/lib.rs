//! Core types for related-field columns: values and records, model
//! descriptors, path resolvers and their cache, and eager-load planning.

#[macro_use]
mod trace;

pub mod cache;
#[cfg(feature = "config")]
pub mod config;
pub mod error;
pub mod fetch;
pub mod list_display;
pub mod model;
pub mod ordering;
pub mod path;
pub mod planner;
pub mod resolver;
pub mod value;

// Re-export key types and traits
pub use cache::ResolverCache;
#[cfg(feature = "config")]
pub use config::{ColumnConfig, ConfigError, ListDisplayConfig};
pub use error::{RelatedFieldError, ResolutionFailure, Result};
pub use fetch::FetchPlan;
pub use list_display::{Column, ListDisplay};
pub use model::{FieldDescriptor, FieldKind, Model, ModelDescriptor};
pub use ordering::{OrderBy, Ordering};
pub use path::{RelationPath, SEPARATOR, is_relation_path};
pub use planner::{EagerLoadSet, plan_eager_load};
pub use resolver::{FormatFn, Resolver, ResolverBuilder, label_for, make_resolver};
pub use value::{Object, Record, ToValue, Value};
