//! Tracing utilities for resolver construction and eager-load planning.
//!
//! Enable the `tracing` feature to emit events via the `tracing` crate.
//! These macros no-op when the feature is disabled, avoiding `#[cfg]` boilerplate
//! at every call site.

/// Emit a debug-level tracing event when a resolver is built for a path.
///
/// ```ignore
/// relfield_trace_build!(&name, &label, "lazy");
/// ```
#[macro_export]
#[doc(hidden)]
macro_rules! relfield_trace_build {
    ($name:expr, $label:expr, $origin:literal) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!(path = %$name, label = %$label, origin = $origin, "relfield.resolver");
    };
}

/// Emit a trace-level event for resolver cache lookups (hit, miss, passthrough).
///
/// ```ignore
/// relfield_trace_cache!("hit", name);
/// ```
#[macro_export]
#[doc(hidden)]
macro_rules! relfield_trace_cache {
    ($event:literal, $name:expr) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!(event = $event, column = %$name, "relfield.cache");
    };
}

/// Emit a debug-level event with the eager-load paths merged into a fetch plan.
///
/// ```ignore
/// relfield_trace_plan!(plan.model(), related);
/// ```
#[macro_export]
#[doc(hidden)]
macro_rules! relfield_trace_plan {
    ($model:expr, $paths:expr) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!(model = %$model, select_related = ?$paths, "relfield.plan");
    };
}
