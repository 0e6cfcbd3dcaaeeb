use crate::OutputFormat;
use anyhow::{Context, Result, bail};
use loadsum_core::report::compare;
use loadsum_core::stats::SummaryRecord;
use loadsum_core::store::StoreReader;
use std::path::Path;

/// Load the single summary stored in `path`
pub fn load_record(path: &Path) -> Result<SummaryRecord> {
    let store = StoreReader::from_file(path)
        .with_context(|| format!("Failed to load summary from {}", path.display()))?;

    if store.len() != 1 {
        bail!(
            "Expected exactly one summary in {}, found {}",
            path.display(),
            store.len()
        );
    }

    store
        .records()
        .next()
        .cloned()
        .context("Summary file is empty")
}

pub fn execute(baseline: &Path, candidate: &Path, format: OutputFormat) -> Result<()> {
    tracing::info!(
        "Comparing {} against {}",
        candidate.display(),
        baseline.display()
    );

    let baseline = load_record(baseline)?;
    let candidate = load_record(candidate)?;
    let comparison = compare(&baseline, &candidate)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&comparison)?),
        OutputFormat::Table => {
            println!("Measure,Baseline,Candidate,Change (%)");
            for change in [comparison.mean, comparison.median] {
                println!(
                    "{},{},{},{:.2}",
                    change.measure, change.baseline, change.candidate, change.percent
                );
            }
        }
        OutputFormat::Pretty => print!("{}", comparison),
    }

    Ok(())
}
