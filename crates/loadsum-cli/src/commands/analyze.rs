use crate::OutputFormat;
use anyhow::{Context, Result};
use loadsum_core::pairing::PairingRule;
use loadsum_core::report::{AnalysisReport, PairOutcome};
use loadsum_core::store::{StoreReader, create_timestamped};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Load the summaries in `dir` and compare every candidate with its baseline
pub fn analyze_dir(dir: &Path, rule: &PairingRule) -> Result<AnalysisReport> {
    tracing::debug!("Reading summaries from: {}", dir.display());

    let store = StoreReader::from_dir(dir)
        .with_context(|| format!("Failed to load summaries from {}", dir.display()))?;

    Ok(AnalysisReport::build(&store, rule))
}

/// Analyze `dir` and write the findings to `out` (default `<dir>/analysis`)
pub fn execute(
    dir: &Path,
    out: Option<PathBuf>,
    rule: &PairingRule,
    format: OutputFormat,
) -> Result<PathBuf> {
    tracing::info!("Analyzing summaries in: {}", dir.display());

    let report = analyze_dir(dir, rule)?;

    let out_dir = out.unwrap_or_else(|| dir.join("analysis"));
    let (path, mut file) = create_timestamped(&out_dir, "analysis", "log")
        .with_context(|| format!("Failed to create analysis file in {}", out_dir.display()))?;
    write!(file, "{}", report)?;
    tracing::info!("Analysis written to {}", path.display());

    match format {
        OutputFormat::Json => output_json(&report)?,
        OutputFormat::Table => output_table(&report),
        OutputFormat::Pretty => output_pretty(&report, &path),
    }

    Ok(path)
}

fn output_pretty(report: &AnalysisReport, path: &Path) {
    use console::style;

    println!("\n{}", style("HTTP vs HTTPS Analysis").bold().cyan());
    println!("{}", style("======================").cyan());

    if report.outcomes.is_empty() {
        println!("\n  No candidate summaries found");
    }

    for outcome in &report.outcomes {
        println!();
        match outcome {
            PairOutcome::Compared(comparison) => print!("{}", comparison),
            PairOutcome::NoBaseline { .. } => print!("{}", style(outcome).yellow()),
            PairOutcome::Failed { .. } => print!("{}", style(outcome).red()),
        }
    }

    println!("\n{} {}", style("Analysis written to").dim(), path.display());
    println!();
}

fn output_json(report: &AnalysisReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{}", json);
    Ok(())
}

fn output_table(report: &AnalysisReport) {
    println!("Candidate,Baseline,Mean Change (%),Median Change (%)");
    for outcome in &report.outcomes {
        match outcome {
            PairOutcome::Compared(c) => println!(
                "{},{},{:.2},{:.2}",
                c.candidate, c.baseline, c.mean.percent, c.median.percent
            ),
            PairOutcome::NoBaseline { candidate } => println!("{},,,", candidate),
            PairOutcome::Failed {
                candidate,
                baseline,
                ..
            } => println!("{},{},,", candidate, baseline),
        }
    }
}
