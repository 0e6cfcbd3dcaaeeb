use crate::OutputFormat;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use loadsum_core::sample::{LogFormat, ReadOptions, SampleExtractor, SampleReader, SampleSet};
use loadsum_core::stats::{SummaryCalculator, SummaryRecord};
use loadsum_core::store::{StoreWriter, SummaryStore};
use std::path::{Path, PathBuf};

/// How the logs of a directory are read and summarized
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub format: LogFormat,
    pub read: ReadOptions,
    /// Glob restricting which file names are summarized
    pub pattern: Option<String>,
    pub parallel: bool,
    pub dump_samples: bool,
}

/// A summarized log file together with the samples it was computed from
struct Summarized {
    record: SummaryRecord,
    samples: SampleSet,
}

fn identifier_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn summarize_file(path: &Path, options: &GenerateOptions) -> Result<Summarized> {
    let extractor = SampleExtractor::new(options.format);
    let samples = SampleReader::from_file(path, &extractor, options.read)
        .with_context(|| format!("Failed to read response times from {}", path.display()))?;

    if samples.skipped() > 0 {
        tracing::warn!(
            "Skipped {} unparsable lines in {}",
            samples.skipped(),
            path.display()
        );
    }

    let record = SummaryCalculator::new().summarize(&identifier_of(path), &samples);
    Ok(Summarized { record, samples })
}

fn summarize_sequential(logs: &[PathBuf], options: &GenerateOptions) -> Result<Vec<Summarized>> {
    let progress = progress_bar(logs.len());
    let mut summaries = Vec::with_capacity(logs.len());

    for path in logs {
        progress.set_message(identifier_of(path));
        summaries.push(summarize_file(path, options)?);
        progress.inc(1);
    }

    progress.finish_and_clear();
    Ok(summaries)
}

fn summarize_parallel(logs: &[PathBuf], options: &GenerateOptions) -> Result<Vec<Summarized>> {
    let runtime = tokio::runtime::Runtime::new()?;
    let progress = progress_bar(logs.len());

    let summaries = runtime.block_on(async {
        let handles: Vec<_> = logs
            .iter()
            .cloned()
            .map(|path| {
                let options = options.clone();
                tokio::task::spawn_blocking(move || summarize_file(&path, &options))
            })
            .collect();

        let mut summaries = Vec::with_capacity(handles.len());
        for handle in handles {
            summaries.push(handle.await.context("Summary task panicked")??);
            progress.inc(1);
        }
        Ok::<_, anyhow::Error>(summaries)
    })?;

    progress.finish_and_clear();
    Ok(summaries)
}

fn progress_bar(len: usize) -> ProgressBar {
    let progress = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::with_template("{spinner} [{pos}/{len}] {wide_msg}") {
        progress.set_style(style);
    }
    progress
}

/// Summarize every log in `dir` into a store
pub fn summarize_dir(dir: &Path, options: &GenerateOptions) -> Result<SummaryStore> {
    let logs = loadsum_core::sample::discover_logs(dir, options.pattern.as_deref())
        .with_context(|| format!("Failed to list log files in {}", dir.display()))?;

    let (store, _) = summarize_logs(&logs, options)?;
    Ok(store)
}

fn summarize_logs(
    logs: &[PathBuf],
    options: &GenerateOptions,
) -> Result<(SummaryStore, Vec<Summarized>)> {
    let summaries = if options.parallel {
        summarize_parallel(logs, options)?
    } else {
        summarize_sequential(logs, options)?
    };

    let store: SummaryStore = summaries.iter().map(|s| s.record.clone()).collect();
    Ok((store, summaries))
}

/// Summarize a directory and write the store to `out` (default `<dir>/summary`)
pub fn execute(
    dir: &Path,
    out: Option<PathBuf>,
    options: &GenerateOptions,
    format: OutputFormat,
) -> Result<PathBuf> {
    tracing::info!(
        "Summarizing {} logs in: {}",
        options.format.as_str(),
        dir.display()
    );

    let out_dir = out.unwrap_or_else(|| dir.join("summary"));
    let logs = loadsum_core::sample::discover_logs(dir, options.pattern.as_deref())
        .with_context(|| format!("Failed to list log files in {}", dir.display()))?;

    let (store, summaries) = summarize_logs(&logs, options)?;

    let store_path = StoreWriter::to_dir(&store, &out_dir)
        .with_context(|| format!("Failed to write summary to {}", out_dir.display()))?;

    // Raw samples live under samples/, StoreReader only loads top-level files
    if options.dump_samples {
        let samples_dir = out_dir.join("samples");
        for summary in &summaries {
            StoreWriter::dump_samples(
                &summary.record.identifier,
                summary.samples.values(),
                &samples_dir,
            )?;
        }
    }

    match format {
        OutputFormat::Json => output_json(&store)?,
        OutputFormat::Table => output_table(&store),
        OutputFormat::Pretty => output_pretty(&store, &store_path),
    }

    Ok(store_path)
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}", v))
}

fn output_pretty(store: &SummaryStore, store_path: &Path) {
    use console::style;

    println!("\n{}", style("Response Time Summary").bold().cyan());
    println!("{}", style("=====================").cyan());

    for record in store.records() {
        println!("\n{}", style(&record.identifier).bold());
        if record.empty {
            println!("  {}", style("No samples").yellow());
            continue;
        }

        let mode = record
            .mode
            .iter()
            .map(|v| format!("{}", v))
            .collect::<Vec<_>>()
            .join(", ");

        println!(
            "  Samples:                       {}",
            record
                .count
                .map_or_else(|| "n/a".to_string(), |n| n.to_string())
        );
        println!("  Min:                           {:.2} ms", record.min);
        println!("  Max:                           {:.2} ms", record.max);
        println!("  Sum:                           {:.2} ms", record.sum);
        println!("  Mean:                          {} ms", fmt_opt(record.mean));
        println!("  Median:                        {} ms", fmt_opt(record.median));
        println!("  Mode:                          [{}]", mode);
        println!(
            "  Population Variance:           {}",
            fmt_opt(record.population_variance)
        );
        println!(
            "  Sample Variance:               {}",
            fmt_opt(record.sample_variance)
        );
        println!(
            "  Standard Deviation Population: {}",
            fmt_opt(record.standard_deviation_population)
        );
        println!(
            "  Standard Deviation Sample:     {}",
            fmt_opt(record.standard_deviation_sample)
        );
        for pair in record.percentiles() {
            println!(
                "  Percentile of {}%:             {} (nearest rank {})",
                pair.rank,
                fmt_opt(pair.interpolated),
                fmt_opt(pair.nearest_rank)
            );
        }
    }

    println!(
        "\n{} {}",
        style("Summary written to").dim(),
        store_path.display()
    );
    println!();
}

fn output_json(store: &SummaryStore) -> Result<()> {
    for record in store.records() {
        println!("{}", StoreWriter::to_string(record)?);
    }
    Ok(())
}

fn output_table(store: &SummaryStore) {
    println!("Identifier,Count,Min,Max,Mean,Median,P99,P95,P90,P85");
    for record in store.records() {
        let percentiles = record
            .percentiles()
            .iter()
            .map(|p| fmt_opt(p.interpolated))
            .collect::<Vec<_>>()
            .join(",");
        println!(
            "{},{},{:.2},{:.2},{},{},{}",
            record.identifier,
            record.count.map(|n| n.to_string()).unwrap_or_default(),
            record.min,
            record.max,
            fmt_opt(record.mean),
            fmt_opt(record.median),
            percentiles
        );
    }
}
