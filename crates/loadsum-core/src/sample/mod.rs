mod discover;
mod extractor;
mod reader;

pub use discover::discover_logs;
pub use extractor::SampleExtractor;
pub use reader::{ReadOptions, SampleReader};

use serde::{Deserialize, Serialize};

/// Layout of the raw transaction log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Comma-delimited records, response time in the second column
    #[default]
    Csv,
    /// JMeter XML samples, response time in the `t="..."` attribute
    Xml,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Csv => "csv",
            LogFormat::Xml => "xml",
        }
    }
}

/// Response times (milliseconds) extracted from one log file, in line order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSet {
    samples: Vec<f64>,
    skipped: usize,
}

impl SampleSet {
    pub fn new(samples: Vec<f64>) -> Self {
        Self {
            samples,
            skipped: 0,
        }
    }

    pub(crate) fn with_skipped(samples: Vec<f64>, skipped: usize) -> Self {
        Self { samples, skipped }
    }

    pub fn values(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of lines dropped because they did not have the expected shape
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl From<Vec<f64>> for SampleSet {
    fn from(samples: Vec<f64>) -> Self {
        Self::new(samples)
    }
}
