//! Makefile.in writer - single-pass text emission
//!
//! One buffered write pass, create+truncate semantics. Concurrent writers
//! against the same directory are last-writer-wins with no locking; the
//! fragment is produced once per build by a single orchestration process.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::export::{resolve, OutputRecord, Variant};
use crate::registry::ConfigRegistry;

/// File name of the generated fragment.
pub const MAKEFILE_NAME: &str = "Makefile.in";

/// Completion signal returned from a successful export.
///
/// Replaces the `$makefile_created` global the original scripts set for the
/// surrounding build tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    /// Path of the written fragment.
    pub path: PathBuf,
    /// Number of `KEY = value` lines written.
    pub entries: usize,
}

/// Writer producing a Makefile.in fragment in a target directory.
pub struct MakefileWriter {
    path: PathBuf,
}

impl MakefileWriter {
    /// Target the directory the fragment should land in; the file itself is
    /// always named [`MAKEFILE_NAME`].
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            path: dir.as_ref().join(MAKEFILE_NAME),
        }
    }

    /// Path that [`export`](Self::export) will write to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve the variant's values against the registry and write the
    /// fragment, truncating any existing file.
    pub fn export<R: ConfigRegistry>(&self, registry: &R, variant: Variant) -> Result<ExportReport> {
        let record = resolve(registry, variant)?;
        self.write_record(&record)
    }

    /// Write an already-resolved record.
    pub fn write_record(&self, record: &OutputRecord) -> Result<ExportReport> {
        let width = record
            .iter()
            .map(|(key, _)| key.name().len())
            .max()
            .unwrap_or(0);

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;

        let mut writer = BufWriter::new(file);
        for (key, value) in record {
            // Padding is cosmetic alignment only, as in mkmf output
            writeln!(writer, "{:<width$} = {}", key.name(), value)?;
        }
        writer.flush()?;

        tracing::info!("Written {} entries to {:?}", record.len(), self.path);

        Ok(ExportReport {
            path: self.path.clone(),
            entries: record.len(),
        })
    }
}
