//! Configuration registries - sources of RbConfig-style key/value data
//!
//! The exporter never talks to a live Ruby interpreter. It reads from a
//! [`ConfigRegistry`], which callers back with whatever they have: an
//! in-memory map, a JSON snapshot, or the `DEP_RB_RBCONFIG_*` environment
//! variables that rb-sys exposes to dependent build scripts.

pub mod env;

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ExportError, Result};

pub use env::EnvRegistry;

/// Read-only mapping from configuration key to string value.
///
/// Lookups return owned strings so environment-backed implementations
/// need no caching.
pub trait ConfigRegistry {
    fn lookup(&self, key: &str) -> Option<String>;
}

/// In-memory registry backed by a sorted map.
///
/// The canonical source for tests and for CLI-supplied `KEY=VALUE` pairs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapRegistry {
    values: BTreeMap<String, String>,
}

impl MapRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from key/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Load a registry from a JSON file containing a flat string-to-string
    /// object, e.g. `{"rubyhdrdir": "/usr/include/ruby-3.0.0"}`.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let value: serde_json::Value = serde_json::from_str(&text)?;

        let object = value.as_object().ok_or_else(|| {
            ExportError::InvalidRegistry("top-level JSON value is not an object".to_string())
        })?;

        let mut values = BTreeMap::new();
        for (key, val) in object {
            let s = val.as_str().ok_or_else(|| {
                ExportError::InvalidRegistry(format!("value for key '{}' is not a string", key))
            })?;
            values.insert(key.clone(), s.to_string());
        }

        Ok(Self { values })
    }

    /// Insert or overwrite a single entry.
    pub fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ConfigRegistry for MapRegistry {
    fn lookup(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}
