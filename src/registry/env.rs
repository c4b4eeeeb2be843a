//! Environment-variable registry source
//!
//! Cargo re-exports rb-sys's RbConfig snapshot to dependent build scripts as
//! `DEP_RB_RBCONFIG_<KEY>` environment variables (e.g.
//! `DEP_RB_RBCONFIG_RUBYHDRDIR` for `rubyhdrdir`). This registry resolves
//! lookups against that convention.

use crate::registry::ConfigRegistry;

/// Default prefix used by the rb-sys crate's `links = "rb"` metadata.
pub const DEFAULT_ENV_PREFIX: &str = "DEP_RB_RBCONFIG_";

/// Registry backed by process environment variables.
#[derive(Debug, Clone)]
pub struct EnvRegistry {
    prefix: String,
}

impl EnvRegistry {
    /// Registry over `DEP_RB_RBCONFIG_*` variables.
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_ENV_PREFIX)
    }

    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }

    /// Environment variable name for a registry key.
    /// Keys are uppercased: `rubyhdrdir` -> `DEP_RB_RBCONFIG_RUBYHDRDIR`.
    pub fn var_name(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key.to_uppercase())
    }
}

impl Default for EnvRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigRegistry for EnvRegistry {
    fn lookup(&self, key: &str) -> Option<String> {
        std::env::var(self.var_name(key)).ok()
    }
}
