use super::{SummaryRecord, descriptive};
use crate::sample::SampleSet;

/// Reduces the samples of one file into a `SummaryRecord`
#[derive(Debug, Default, Clone, Copy)]
pub struct SummaryCalculator;

impl SummaryCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn summarize(&self, identifier: &str, samples: &SampleSet) -> SummaryRecord {
        tracing::debug!("Summarizing {} samples for {}", samples.len(), identifier);

        // Every measure reads the sorted samples so permutations give identical bits
        let sorted = descriptive::sorted(samples.values());

        if sorted.is_empty() {
            tracing::warn!("{} has no usable samples, summary is degenerate", identifier);
        }

        let (min, max) = match (sorted.first(), sorted.last()) {
            (Some(&min), Some(&max)) => (min, max),
            _ => (0.0, 0.0),
        };

        let population_variance = descriptive::population_variance(&sorted);
        let sample_variance = descriptive::sample_variance(&sorted);
        let interpolated = |p: f64| descriptive::percentile_interpolated(&sorted, p);
        let nearest_rank = |p: f64| descriptive::percentile_nearest_rank(&sorted, p);

        SummaryRecord {
            identifier: identifier.to_string(),
            count: Some(sorted.len()),
            empty: sorted.is_empty(),
            min,
            max,
            sum: sorted.iter().sum(),
            mean: descriptive::mean(&sorted),
            median: descriptive::median(&sorted),
            mode: descriptive::mode(&sorted),
            population_variance,
            sample_variance,
            standard_deviation_population: population_variance.map(f64::sqrt),
            standard_deviation_sample: sample_variance.map(f64::sqrt),
            percentile_of_99: interpolated(99.0),
            percentile_nearest_rank_of_99: nearest_rank(99.0),
            percentile_of_95: interpolated(95.0),
            percentile_nearest_rank_of_95: nearest_rank(95.0),
            percentile_of_90: interpolated(90.0),
            percentile_nearest_rank_of_90: nearest_rank(90.0),
            percentile_of_85: interpolated(85.0),
            percentile_nearest_rank_of_85: nearest_rank(85.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::PERCENTILE_RANKS;

    fn response_times() -> SampleSet {
        SampleSet::new(vec![
            120.0, 85.0, 97.0, 85.0, 310.0, 101.0, 99.0, 85.0, 143.0, 110.0, 97.0, 102.0,
        ])
    }

    #[test]
    fn test_summarize_basic_measures() {
        let record = SummaryCalculator::new().summarize("run-http-1.log", &response_times());

        assert_eq!(record.identifier, "run-http-1.log");
        assert_eq!(record.count, Some(12));
        assert!(!record.empty);
        assert_eq!(record.min, 85.0);
        assert_eq!(record.max, 310.0);
        assert_eq!(record.sum, 1434.0);
        assert_eq!(record.mean, Some(119.5));
        assert_eq!(record.median, Some(100.0));
        assert_eq!(record.mode, vec![85.0]);
        assert!(record.sample_variance.unwrap() > record.population_variance.unwrap());
    }

    #[test]
    fn test_percentiles_within_range() {
        let sets = [
            response_times(),
            SampleSet::new(vec![42.0]),
            SampleSet::new(vec![310.0, 85.0]),
            SampleSet::new(vec![7.0, 7.0, 7.0]),
            SampleSet::new(vec![1.0, 2.0, 3.0, 10.0]),
        ];

        for samples in &sets {
            let record = SummaryCalculator::new().summarize("a.log", samples);

            let pairs = record.percentiles();
            assert_eq!(pairs.map(|p| p.rank), PERCENTILE_RANKS);
            for pair in pairs {
                for value in [pair.interpolated.unwrap(), pair.nearest_rank.unwrap()] {
                    assert!(
                        record.min <= value && value <= record.max,
                        "p{} = {} outside [{}, {}] for {:?}",
                        pair.rank,
                        value,
                        record.min,
                        record.max,
                        samples.values()
                    );
                }
            }

            let median = record.median.unwrap();
            assert!(record.min <= median && median <= record.max);
        }
    }

    #[test]
    fn test_empty_samples_produce_degenerate_record() {
        let record = SummaryCalculator::new().summarize("empty.log", &SampleSet::default());

        assert!(record.empty);
        assert_eq!(record.count, Some(0));
        assert_eq!(record.min, 0.0);
        assert_eq!(record.max, 0.0);
        assert_eq!(record.sum, 0.0);
        assert_eq!(record.mean, None);
        assert_eq!(record.median, None);
        assert!(record.mode.is_empty());
        assert_eq!(record.population_variance, None);
        assert_eq!(record.sample_variance, None);
        assert_eq!(record.percentile_of_99, None);
        assert_eq!(record.percentile_nearest_rank_of_85, None);
    }

    #[test]
    fn test_single_sample() {
        let record = SummaryCalculator::new().summarize("one.log", &SampleSet::new(vec![42.0]));

        assert_eq!(record.population_variance, Some(0.0));
        assert_eq!(record.standard_deviation_population, Some(0.0));
        assert_eq!(record.sample_variance, None);
        assert_eq!(record.standard_deviation_sample, None);
        assert_eq!(record.mode, vec![42.0]);
        assert_eq!(record.percentile_of_99, Some(42.0));
    }

    #[test]
    fn test_summarize_is_deterministic() {
        let calculator = SummaryCalculator::new();
        let samples = response_times();
        let first = calculator.summarize("a.log", &samples);
        let second = calculator.summarize("a.log", &samples);
        assert_eq!(first, second);
        assert_eq!(
            first.standard_deviation_sample.map(f64::to_bits),
            second.standard_deviation_sample.map(f64::to_bits)
        );
    }

    #[test]
    fn test_order_does_not_matter() {
        let calculator = SummaryCalculator::new();
        // Wide magnitude spread makes the sum depend on addition order
        let forward = calculator.summarize("a.log", &SampleSet::new(vec![0.1, 0.2, 0.3, 1e16, 1.0]));
        let backward =
            calculator.summarize("a.log", &SampleSet::new(vec![1.0, 1e16, 0.3, 0.2, 0.1]));
        let shuffled =
            calculator.summarize("a.log", &SampleSet::new(vec![0.3, 1.0, 0.1, 1e16, 0.2]));

        for other in [&backward, &shuffled] {
            assert_eq!(&forward, other);
            assert_eq!(forward.sum.to_bits(), other.sum.to_bits());
            assert_eq!(
                forward.mean.map(f64::to_bits),
                other.mean.map(f64::to_bits)
            );
            assert_eq!(
                forward.population_variance.map(f64::to_bits),
                other.population_variance.map(f64::to_bits)
            );
            assert_eq!(
                forward.sample_variance.map(f64::to_bits),
                other.sample_variance.map(f64::to_bits)
            );
        }
    }
}
