use crate::stats::{Measure, SummaryRecord};
use crate::{Error, Result};
use serde::Serialize;
use std::fmt;

/// Change of one measure from baseline to candidate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeasureChange {
    pub measure: Measure,
    pub baseline: f64,
    pub candidate: f64,
    /// Relative change in percent; positive means the candidate is slower
    pub percent: f64,
}

/// Mean and median change between a baseline run and its candidate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub candidate: String,
    pub baseline: String,
    pub mean: MeasureChange,
    pub median: MeasureChange,
}

/// `100 * (candidate - baseline) / baseline`
pub fn percent_change(measure: Measure, baseline: f64, candidate: f64) -> Result<f64> {
    if baseline == 0.0 {
        return Err(Error::DivisionByBaselineZero {
            measure: measure.to_string(),
        });
    }
    Ok(100.0 * (candidate - baseline) / baseline)
}

fn measure_change(
    measure: Measure,
    baseline: &SummaryRecord,
    candidate: &SummaryRecord,
) -> Result<MeasureChange> {
    let undefined = |record: &SummaryRecord| Error::UndefinedMeasure {
        measure: measure.to_string(),
        identifier: record.identifier.clone(),
    };

    let baseline_value = baseline.measure(measure).ok_or_else(|| undefined(baseline))?;
    let candidate_value = candidate
        .measure(measure)
        .ok_or_else(|| undefined(candidate))?;

    Ok(MeasureChange {
        measure,
        baseline: baseline_value,
        candidate: candidate_value,
        percent: percent_change(measure, baseline_value, candidate_value)?,
    })
}

/// Compare a candidate record against its baseline
pub fn compare(baseline: &SummaryRecord, candidate: &SummaryRecord) -> Result<Comparison> {
    tracing::debug!(
        "Comparing {} against {}",
        candidate.identifier,
        baseline.identifier
    );

    Ok(Comparison {
        candidate: candidate.identifier.clone(),
        baseline: baseline.identifier.clone(),
        mean: measure_change(Measure::Mean, baseline, candidate)?,
        median: measure_change(Measure::Median, baseline, candidate)?,
    })
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Performing analysis on {} against {}",
            self.candidate, self.baseline
        )?;
        writeln!(
            f,
            "The mean response time increased by: {:.2}% (From {:.2} to {:.2})",
            self.mean.percent, self.mean.baseline, self.mean.candidate
        )?;
        writeln!(
            f,
            "The median response time increased by: {:.2}% (From {} to {})",
            self.median.percent, self.median.baseline, self.median.candidate
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::SampleSet;
    use crate::stats::SummaryCalculator;

    fn record(identifier: &str, samples: Vec<f64>) -> SummaryRecord {
        SummaryCalculator::new().summarize(identifier, &SampleSet::new(samples))
    }

    #[test]
    fn test_percent_change() {
        assert_eq!(percent_change(Measure::Mean, 100.0, 150.0).unwrap(), 50.0);
        assert_eq!(percent_change(Measure::Mean, 200.0, 150.0).unwrap(), -25.0);
        assert_eq!(percent_change(Measure::Median, 80.0, 80.0).unwrap(), 0.0);
    }

    #[test]
    fn test_zero_baseline_is_an_error() {
        let err = percent_change(Measure::Mean, 0.0, 150.0).unwrap_err();
        assert!(matches!(err, Error::DivisionByBaselineZero { ref measure } if measure == "mean"));
    }

    #[test]
    fn test_compare_mean_and_median() {
        let baseline = record("api-http-1.log", vec![90.0, 100.0, 110.0]);
        let candidate = record("api-https-2.log", vec![140.0, 150.0, 160.0]);

        let comparison = compare(&baseline, &candidate).unwrap();
        assert_eq!(comparison.mean.percent, 50.0);
        assert_eq!(comparison.median.percent, 50.0);
        assert_eq!(comparison.median.baseline, 100.0);
        assert_eq!(comparison.median.candidate, 150.0);

        let text = comparison.to_string();
        assert!(text.starts_with("Performing analysis on api-https-2.log against api-http-1.log"));
        assert!(text.contains("The mean response time increased by: 50.00% (From 100.00 to 150.00)"));
        assert!(text.contains("The median response time increased by: 50.00% (From 100 to 150)"));
    }

    #[test]
    fn test_compare_empty_record_is_undefined() {
        let baseline = record("api-http-1.log", vec![]);
        let candidate = record("api-https-2.log", vec![150.0]);

        let err = compare(&baseline, &candidate).unwrap_err();
        assert!(matches!(err, Error::UndefinedMeasure { ref identifier, .. } if identifier == "api-http-1.log"));
    }
}
