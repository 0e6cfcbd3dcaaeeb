use super::{SampleExtractor, SampleSet};
use crate::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Options applied while reading a log file
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOptions {
    /// Ignore the first line (CSV exports carry a column header)
    pub skip_header: bool,
}

pub struct SampleReader;

impl SampleReader {
    /// Read all response times from a log file
    pub fn from_file(
        path: &Path,
        extractor: &SampleExtractor,
        options: ReadOptions,
    ) -> Result<SampleSet> {
        tracing::debug!("Reading samples from: {}", path.display());

        let file = File::open(path)?;
        let samples = Self::from_reader(BufReader::new(file), extractor, options)?;

        tracing::debug!(
            "Extracted {} samples from {} ({} lines skipped)",
            samples.len(),
            path.display(),
            samples.skipped()
        );

        Ok(samples)
    }

    /// Read response times from in-memory log content
    pub fn from_str(
        content: &str,
        extractor: &SampleExtractor,
        options: ReadOptions,
    ) -> Result<SampleSet> {
        Self::from_reader(content.as_bytes(), extractor, options)
    }

    /// Extract a sample from every line. Lines with the wrong shape are skipped;
    /// a value that is not a valid response time aborts the whole read.
    pub fn from_reader<R: BufRead>(
        reader: R,
        extractor: &SampleExtractor,
        options: ReadOptions,
    ) -> Result<SampleSet> {
        let mut samples = Vec::new();
        let mut skipped = 0;

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;

            if options.skip_header && idx == 0 {
                continue;
            }

            match extractor.extract(&line) {
                Ok(value) => samples.push(value),
                Err(Error::InvalidNumber { value }) => {
                    return Err(Error::InvalidNumberAt {
                        line: line_no,
                        value,
                    });
                }
                Err(e) if e.is_recoverable_line_error() => {
                    tracing::warn!("Could not parse line {}: {} ({})", line_no, line, e);
                    skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(SampleSet::with_skipped(samples, skipped))
    }
}
