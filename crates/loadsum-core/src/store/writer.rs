use super::SummaryStore;
use crate::Result;
use crate::stats::SummaryRecord;
use chrono::Utc;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

pub struct StoreWriter;

impl StoreWriter {
    /// Write every record of the store to a new `summary-<timestamp>.log` in `dir`
    pub fn to_dir(store: &SummaryStore, dir: &Path) -> Result<PathBuf> {
        let (path, file) = create_timestamped(dir, "summary", "log")?;
        tracing::debug!("Writing summary store to: {}", path.display());

        let mut writer = BufWriter::new(file);
        Self::to_writer(store, &mut writer)?;
        writer.flush()?;

        tracing::info!(
            "Successfully wrote {} summaries to {}",
            store.len(),
            path.display()
        );

        Ok(path)
    }

    /// Write one compact JSON record per line
    pub fn to_writer<W: Write>(store: &SummaryStore, writer: &mut W) -> Result<()> {
        for record in store.records() {
            Self::write_record(record, writer)?;
        }
        Ok(())
    }

    pub fn write_record<W: Write>(record: &SummaryRecord, writer: &mut W) -> Result<()> {
        serde_json::to_writer(&mut *writer, record)?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    /// Convert a record to its single-line JSON form
    pub fn to_string(record: &SummaryRecord) -> Result<String> {
        Ok(serde_json::to_string(record)?)
    }

    /// Dump raw samples, one per line, to `responseTime-<identifier>-<timestamp>.log`
    pub fn dump_samples(identifier: &str, samples: &[f64], dir: &Path) -> Result<PathBuf> {
        let prefix = format!("responseTime-{}", identifier);
        let (path, file) = create_timestamped(dir, &prefix, "log")?;
        tracing::debug!("Dumping {} samples to: {}", samples.len(), path.display());

        let mut writer = BufWriter::new(file);
        for value in samples {
            writeln!(writer, "{:.6}", value)?;
        }
        writer.flush()?;

        Ok(path)
    }
}

/// Create `<prefix>-<UTC timestamp>-<counter>.<ext>` in `dir`, creating `dir` if needed.
///
/// The file is opened with create-new semantics, so separate runs never share an
/// artifact. Names sort in creation order.
pub fn create_timestamped(dir: &Path, prefix: &str, ext: &str) -> Result<(PathBuf, File)> {
    let stamp = Utc::now().format("%Y%m%dT%H%M%S%3fZ").to_string();
    create_stamped(dir, prefix, &stamp, ext)
}

/// Create the first free `<prefix>-<stamp>-<counter>.<ext>`; the counter is zero padded
/// so files sharing a stamp still sort in creation order.
pub(crate) fn create_stamped(
    dir: &Path,
    prefix: &str,
    stamp: &str,
    ext: &str,
) -> Result<(PathBuf, File)> {
    fs::create_dir_all(dir)?;

    let mut attempt = 0u32;
    loop {
        let path = dir.join(format!("{}-{}-{:04}.{}", prefix, stamp, attempt, ext));

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
            Err(e) => return Err(e.into()),
        }
    }
}
