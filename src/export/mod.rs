//! Makefile.in export - key resolution, derivation and formatting
//!
//! Reproduces the behavior of the extconf-style scripts that precede a native
//! extension build: pull a fixed set of values out of a [`ConfigRegistry`],
//! derive the composite ones, and emit them as `KEY = value` lines.

pub mod writer;

#[cfg(test)]
mod tests;

use std::path::Path;
use std::str::FromStr;

use crate::error::{ExportError, Result};
use crate::registry::ConfigRegistry;

pub use writer::{ExportReport, MakefileWriter, MAKEFILE_NAME};

/// Names exported into the generated Makefile.in, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKey {
    RubyInclude,
    RubyIncludeArch,
    RubyLib,
    RubySoName,
    LibRubyArgShared,
    LibRubyArgStatic,
    LibRubyArg,
}

impl ExportKey {
    /// Name as it appears in the generated file.
    pub fn name(&self) -> &'static str {
        match self {
            ExportKey::RubyInclude => "RUBY_INCLUDE",
            ExportKey::RubyIncludeArch => "RUBY_INCLUDE_ARCH",
            ExportKey::RubyLib => "RUBY_LIB",
            ExportKey::RubySoName => "RUBY_SO_NAME",
            ExportKey::LibRubyArgShared => "LIBRUBYARG_SHARED",
            ExportKey::LibRubyArgStatic => "LIBRUBYARG_STATIC",
            ExportKey::LibRubyArg => "LIBRUBYARG",
        }
    }
}

/// Ordered sequence of (exported name, value) pairs. Built fresh per export,
/// order is emission order.
pub type OutputRecord = Vec<(ExportKey, String)>;

/// Which of the observed extconf script variants to reproduce.
///
/// The scripts differ only in which registry keys they query and in how
/// `LIBRUBYARG` is derived. The two derivations are distinct policies, never
/// mixed: [`Variant::Full`] recomputes it from the shared/static pair,
/// [`Variant::Passthrough`] exports a pre-resolved registry value verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Only `RUBY_INCLUDE`, from `rubyhdrdir`.
    Minimal,
    /// All seven names; `LIBRUBYARG` falls back to the static linker args
    /// when the shared ones are empty.
    #[default]
    Full,
    /// All seven names; `LIBRUBYARG` read directly from the registry.
    Passthrough,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Minimal => "minimal",
            Variant::Full => "full",
            Variant::Passthrough => "passthrough",
        }
    }

    /// Number of lines this variant emits.
    pub fn line_count(&self) -> usize {
        match self {
            Variant::Minimal => 1,
            Variant::Full | Variant::Passthrough => 7,
        }
    }
}

impl FromStr for Variant {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "minimal" => Ok(Variant::Minimal),
            "full" => Ok(Variant::Full),
            "passthrough" => Ok(Variant::Passthrough),
            other => Err(ExportError::UnknownVariant(other.to_string())),
        }
    }
}

/// Lookup a required key, failing with the key's name when absent.
fn require<R: ConfigRegistry>(registry: &R, key: &str) -> Result<String> {
    registry
        .lookup(key)
        .ok_or_else(|| ExportError::MissingKey(key.to_string()))
}

/// Resolve every value the variant requires and assemble the output record.
///
/// All lookups happen before any file is touched, so a missing key can never
/// leave a partially written Makefile.in behind.
pub fn resolve<R: ConfigRegistry>(registry: &R, variant: Variant) -> Result<OutputRecord> {
    let include = require(registry, "rubyhdrdir")?;

    let mut record: OutputRecord = vec![(ExportKey::RubyInclude, include.clone())];
    if variant == Variant::Minimal {
        return Ok(record);
    }

    let arch = require(registry, "arch")?;
    let libdir = require(registry, "libdir")?;
    let so_name = require(registry, "RUBY_SO_NAME")?;
    let shared = require(registry, "LIBRUBYARG_SHARED")?;
    let statik = require(registry, "LIBRUBYARG_STATIC")?;

    let include_arch = Path::new(&include)
        .join(&arch)
        .to_string_lossy()
        .into_owned();

    let libruby_arg = match variant {
        Variant::Full => {
            if shared.is_empty() {
                statik.clone()
            } else {
                shared.clone()
            }
        }
        Variant::Passthrough => require(registry, "LIBRUBYARG")?,
        Variant::Minimal => unreachable!(),
    };

    record.push((ExportKey::RubyIncludeArch, include_arch));
    record.push((ExportKey::RubyLib, libdir));
    record.push((ExportKey::RubySoName, so_name));
    record.push((ExportKey::LibRubyArgShared, shared));
    record.push((ExportKey::LibRubyArgStatic, statik));
    record.push((ExportKey::LibRubyArg, libruby_arg));

    Ok(record)
}
