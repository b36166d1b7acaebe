//! # relfield
//!
//! Sortable, customizable related-field columns for admin change lists.
//!
//! Columns can name values on related objects with `__`-joined paths
//! (`event__room__name`). Each path gets a resolver that walks the relations
//! for every row, carries the column header and sort key, and the relations
//! the columns traverse are added to the page's fetch so rows arrive with
//! their related objects already loaded.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use relfield::prelude::*;
//!
//! #[derive(Debug, Record)]
//! #[record(display = "name")]
//! struct Room {
//!     name: String,
//! }
//!
//! #[derive(Debug, Record)]
//! struct Event {
//!     date: String,
//!     #[record(relation = "Room")]
//!     room: Option<Arc<Room>>,
//! }
//!
//! #[derive(Debug, Record)]
//! struct Banquet {
//!     #[record(relation = "Event")]
//!     event: Arc<Event>,
//!     start_time: String,
//! }
//!
//! # fn main() -> relfield::Result<()> {
//! let list = ListDisplay::new(
//!     Banquet::descriptor(),
//!     ["event__date", "event__room", "start_time"],
//! )
//! .declare(Resolver::builder("event__date").label("Event date").build()?);
//! list.validate()?;
//!
//! let row = Banquet {
//!     event: Arc::new(Event {
//!         date: "2024-05-01".into(),
//!         room: Some(Arc::new(Room { name: "Hall A".into() })),
//!     }),
//!     start_time: "18:00".into(),
//! };
//!
//! assert_eq!(list.headers()?, ["Event date", "Room", "Start Time"]);
//! assert_eq!(list.display_value("event__room", &row)?.to_string(), "Hall A");
//!
//! let plan = list.queryset(FetchPlan::new("Banquet"));
//! assert!(plan.related().contains("event"));
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate self as relfield;

// =============================================================================
// Root-level exports
// =============================================================================

/// Result type for related-field operations
pub use relfield_core::error::Result;

/// Derives `Record` and `Model` for a struct
pub use relfield_macros::Record;

/// Error types
pub mod error {
    pub use relfield_core::error::{RelatedFieldError, ResolutionFailure};

    #[cfg(feature = "config")]
    #[cfg_attr(docsrs, doc(cfg(feature = "config")))]
    pub use relfield_core::config::ConfigError;
}

// =============================================================================
// Core module
// =============================================================================

/// Core types and traits.
///
/// # Module Structure
///
/// - **Objects**: `Record`, `Value`, `ToValue`, `Object`
/// - **Models**: `Model`, `ModelDescriptor`, `FieldDescriptor`, `FieldKind`
/// - **Resolvers**: `Resolver`, `ResolverBuilder`, `ResolverCache`, `make_resolver`
/// - **Planning**: `plan_eager_load`, `EagerLoadSet`, `FetchPlan`, `Ordering`
pub mod core {
    // ==========================================================================
    // Objects and values
    // ==========================================================================

    pub use relfield_core::value::{Object, Record, ToValue, Value};

    // ==========================================================================
    // Model metadata
    // ==========================================================================

    pub use relfield_core::model::{FieldDescriptor, FieldKind, Model, ModelDescriptor};

    // ==========================================================================
    // Paths and resolvers
    // ==========================================================================

    pub use relfield_core::cache::ResolverCache;
    pub use relfield_core::path::{
        RelationPath, SEPARATOR, is_relation_path, relation_prefix,
    };
    pub use relfield_core::resolver::{
        FormatFn, Resolver, ResolverBuilder, label_for, make_resolver,
    };

    // ==========================================================================
    // Query planning
    // ==========================================================================

    pub use relfield_core::fetch::FetchPlan;
    pub use relfield_core::ordering::{OrderBy, Ordering};
    pub use relfield_core::planner::{EagerLoadSet, plan_eager_load};
}

// =============================================================================
// Change lists
// =============================================================================

/// Change-list column configuration.
pub mod admin {
    pub use relfield_core::list_display::{Column, ListDisplay};

    #[cfg(feature = "config")]
    #[cfg_attr(docsrs, doc(cfg(feature = "config")))]
    pub use relfield_core::config::{ColumnConfig, ListDisplayConfig};
}

/// Common imports for declaring models and list displays.
pub mod prelude {
    pub use crate::Record;
    pub use crate::admin::{Column, ListDisplay};
    pub use crate::core::{
        FetchPlan, Model, Object, OrderBy, Ordering, Record, Resolver, ToValue, Value,
        make_resolver, plan_eager_load,
    };

    #[cfg(feature = "config")]
    pub use crate::admin::ListDisplayConfig;
}
