//! Memoized resolvers keyed by column name.

use compact_str::CompactString;
use core::fmt;
use hashbrown::HashMap;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::error::Result;
use crate::path::is_relation_path;
use crate::resolver::Resolver;

/// Lookup table consulted for any column the host does not recognize.
///
/// Names containing the path separator get a resolver built and stored on
/// first lookup; later lookups return the stored resolver. Entries are never
/// evicted.
///
/// Two threads missing on the same name at once may both build a resolver.
/// Construction is pure, and the first one stored is returned to both.
#[derive(Default)]
pub struct ResolverCache {
    entries: RwLock<HashMap<CompactString, Arc<Resolver>>>,
}

impl ResolverCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a customised resolver under `name`, replacing any resolver
    /// previously built or declared for it.
    pub fn declare(&self, name: impl Into<CompactString>, resolver: Resolver) -> Arc<Resolver> {
        let resolver = Arc::new(resolver);
        self.entries.write().insert(name.into(), resolver.clone());
        resolver
    }

    /// Returns the resolver for `name`, building it if `name` is a relation
    /// path seen for the first time.
    ///
    /// `Ok(None)` means `name` is not a relation path and nothing was declared
    /// for it, so the caller should continue with its own lookup.
    pub fn get(&self, name: &str) -> Result<Option<Arc<Resolver>>> {
        if let Some(resolver) = self.lookup(name) {
            crate::relfield_trace_cache!("hit", name);
            return Ok(Some(resolver));
        }

        if !is_relation_path(name) {
            crate::relfield_trace_cache!("passthrough", name);
            return Ok(None);
        }

        crate::relfield_trace_cache!("miss", name);
        let built = Arc::new(Resolver::new(name)?);

        let mut entries = self.entries.write();
        let stored = entries
            .entry(CompactString::from(name))
            .or_insert(built)
            .clone();
        Ok(Some(stored))
    }

    /// Returns a stored resolver without building one.
    pub fn lookup(&self, name: &str) -> Option<Arc<Resolver>> {
        self.entries.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for ResolverCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries.read();
        f.debug_struct("ResolverCache")
            .field("columns", &entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
