//! List display configuration
//!
//! Loads change-list columns from TOML:
//!
//! ```toml
//! display_fields = ["event__date", "event__room", "start_time"]
//! select_related = ["event__room"]
//!
//! [columns.event__date]
//! label = "Event date"
//! ```

use compact_str::CompactString;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::list_display::ListDisplay;
use crate::model::ModelDescriptor;
use crate::resolver::Resolver;

// ============================================================================
// Config
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListDisplayConfig {
    /// Columns in display order
    pub display_fields: Vec<CompactString>,

    /// Relations to load even if no column walks them
    #[serde(default)]
    pub select_related: Vec<CompactString>,

    /// Per-column overrides, keyed by column name
    #[serde(default)]
    pub columns: BTreeMap<CompactString, ColumnConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnConfig {
    /// Relation path to walk, if different from the column name
    pub path: Option<CompactString>,
    pub label: Option<CompactString>,
    pub sort_key: Option<CompactString>,
}

impl ListDisplayConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, Error> {
        Ok(toml::from_str(content)?)
    }

    /// Load from specific path
    pub fn load_from(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::NotFound(path.into())
            } else {
                Error::Io(path.into(), e)
            }
        })?;

        toml::from_str(&content).map_err(|e| Error::ParseFile(path.into(), e))
    }

    /// Builds and validates the list display for `model`.
    pub fn into_list_display(
        self,
        model: &'static ModelDescriptor,
    ) -> crate::error::Result<ListDisplay> {
        let mut list =
            ListDisplay::new(model, self.display_fields).with_select_related(self.select_related);

        for (column, overrides) in self.columns {
            let path = overrides.path.unwrap_or_else(|| column.clone());
            let mut builder = Resolver::builder(path);
            if let Some(label) = overrides.label {
                builder = builder.label(label);
            }
            if let Some(sort_key) = overrides.sort_key {
                builder = builder.sort_key(sort_key);
            }
            list = list.declare_as(column, builder.build()?);
        }

        list.validate()?;
        Ok(list)
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse list display config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to parse {}: {}", .0.display(), .1)]
    ParseFile(PathBuf, #[source] toml::de::Error),
}

pub type ConfigError = Error;

// ============================================================================
// Tests
// ============================================================================
