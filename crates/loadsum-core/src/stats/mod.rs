mod calculator;
pub mod descriptive;

pub use calculator::SummaryCalculator;

use serde::{Deserialize, Serialize};

/// Percentile ranks reported for every file, highest first
pub const PERCENTILE_RANKS: [u8; 4] = [99, 95, 90, 85];

/// Statistical fingerprint of the response times in one log file
///
/// Measures that divide by the sample count are `None` when there are not enough
/// samples for them to be defined: everything but `min`, `max`, `sum` and `mode` for an
/// empty file, and the sample variance/deviation for a single sample.
///
/// `count` is `None` for records written before the sample count was stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    #[serde(alias = "Id")]
    pub identifier: String,
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub empty: bool,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub mode: Vec<f64>,
    pub population_variance: Option<f64>,
    pub sample_variance: Option<f64>,
    pub standard_deviation_population: Option<f64>,
    pub standard_deviation_sample: Option<f64>,
    pub percentile_of_99: Option<f64>,
    pub percentile_nearest_rank_of_99: Option<f64>,
    pub percentile_of_95: Option<f64>,
    pub percentile_nearest_rank_of_95: Option<f64>,
    pub percentile_of_90: Option<f64>,
    pub percentile_nearest_rank_of_90: Option<f64>,
    pub percentile_of_85: Option<f64>,
    pub percentile_nearest_rank_of_85: Option<f64>,
}

/// Percentile at one rank computed both ways
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentilePair {
    pub rank: u8,
    pub interpolated: Option<f64>,
    pub nearest_rank: Option<f64>,
}

impl SummaryRecord {
    /// The four percentile pairs in `PERCENTILE_RANKS` order
    pub fn percentiles(&self) -> [PercentilePair; 4] {
        [
            PercentilePair {
                rank: 99,
                interpolated: self.percentile_of_99,
                nearest_rank: self.percentile_nearest_rank_of_99,
            },
            PercentilePair {
                rank: 95,
                interpolated: self.percentile_of_95,
                nearest_rank: self.percentile_nearest_rank_of_95,
            },
            PercentilePair {
                rank: 90,
                interpolated: self.percentile_of_90,
                nearest_rank: self.percentile_nearest_rank_of_90,
            },
            PercentilePair {
                rank: 85,
                interpolated: self.percentile_of_85,
                nearest_rank: self.percentile_nearest_rank_of_85,
            },
        ]
    }

    /// Look up a central-tendency measure by name
    pub fn measure(&self, measure: Measure) -> Option<f64> {
        match measure {
            Measure::Mean => self.mean,
            Measure::Median => self.median,
        }
    }
}

/// Measures compared between a baseline and a candidate run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Measure {
    Mean,
    Median,
}

impl Measure {
    pub fn as_str(&self) -> &'static str {
        match self {
            Measure::Mean => "mean",
            Measure::Median => "median",
        }
    }
}

impl std::fmt::Display for Measure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
