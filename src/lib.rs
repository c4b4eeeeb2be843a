//! rbmk - Ruby extension build-configuration exporter
//!
//! Reimplements the extconf-style scripts that run before a native extension
//! build: read RbConfig values from a registry, derive the composite ones,
//! and write a `Makefile.in` fragment for the downstream build to consume.
//!
//! # Architecture
//!
//! - **Registry**: injectable key/value source - in-memory map, JSON
//!   snapshot, or `DEP_RB_RBCONFIG_*` environment variables
//! - **Export**: variant selection, key resolution, composite derivation
//! - **Writer**: single buffered pass, create+truncate, aligned `KEY = value`
//!   lines with a trailing newline
//!
//! Concurrent exports into the same directory are last-writer-wins; the
//! fragment is meant to be produced once per build by one orchestration
//! process.
//!
//! # Usage example
//!
//! ```no_run
//! use rbmk::{MakefileWriter, MapRegistry, Variant};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = MapRegistry::from_pairs([
//!     ("rubyhdrdir", "/usr/include/ruby-3.0.0"),
//!     ("arch", "x86_64-linux"),
//!     ("libdir", "/usr/lib"),
//!     ("RUBY_SO_NAME", "ruby3.0"),
//!     ("LIBRUBYARG_SHARED", "-lruby3.0"),
//!     ("LIBRUBYARG_STATIC", "-lruby3.0-static"),
//! ]);
//!
//! let report = MakefileWriter::new("./ext").export(&registry, Variant::Full)?;
//! println!("wrote {} entries to {}", report.entries, report.path.display());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod export;
pub mod registry;

pub use error::{ExportError, Result};
pub use export::{ExportKey, ExportReport, MakefileWriter, OutputRecord, Variant, MAKEFILE_NAME};
pub use registry::{ConfigRegistry, EnvRegistry, MapRegistry};
