use super::SummaryStore;
use crate::Result;
use crate::stats::SummaryRecord;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

pub struct StoreReader;

impl StoreReader {
    /// Read every summary file in a directory into one store.
    ///
    /// Hidden files and subdirectories are ignored; files are read in name order so a
    /// later run's record wins when an identifier appears twice.
    pub fn from_dir(dir: &Path) -> Result<SummaryStore> {
        tracing::debug!("Reading summary store from: {}", dir.display());

        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let hidden = entry.file_name().to_string_lossy().starts_with('.');
            if entry.file_type()?.is_file() && !hidden {
                paths.push(entry.path());
            }
        }
        paths.sort();

        let mut store = SummaryStore::new();
        for path in paths {
            store.extend(Self::records_from_file(&path)?);
        }

        tracing::info!(
            "Loaded {} summaries from {}",
            store.len(),
            dir.display()
        );

        Ok(store)
    }

    /// Read a single summary file
    pub fn from_file(path: &Path) -> Result<SummaryStore> {
        Ok(Self::records_from_file(path)?.into_iter().collect())
    }

    /// Parse records from JSON lines content
    pub fn from_str(content: &str) -> Result<SummaryStore> {
        Ok(Self::records_from_reader(content.as_bytes())?
            .into_iter()
            .collect())
    }

    /// Parse a single record, e.g. one line of a summary file
    pub fn record_from_str(line: &str) -> Result<SummaryRecord> {
        let mut record: SummaryRecord = serde_json::from_str(line)?;
        if record.count.is_none() {
            // Legacy records carry neither count nor empty flag
            record.empty = record.mean.is_none();
        }
        Ok(record)
    }

    fn records_from_file(path: &Path) -> Result<Vec<SummaryRecord>> {
        tracing::debug!("Reading summaries from: {}", path.display());
        let file = File::open(path)?;
        Self::records_from_reader(BufReader::new(file))
    }

    fn records_from_reader<R: BufRead>(reader: R) -> Result<Vec<SummaryRecord>> {
        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(Self::record_from_str(&line)?);
        }
        Ok(records)
    }
}
