use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use loadsum_cli::commands;
use loadsum_cli::commands::generate::GenerateOptions;
use loadsum_cli::{InputFormat, OutputFormat};
use loadsum_core::pairing::PairingRule;
use loadsum_core::sample::ReadOptions;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "loadsum")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Summarize load-test response times and compare http/https runs",
    long_about = "loadsum computes descriptive statistics (mean, median, mode, variance, \
                  percentiles) for every JMeter result file in a directory, and compares \
                  the summaries of paired http and https runs to measure the latency \
                  added by TLS."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "pretty")]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize every log file in a directory
    Generate {
        /// Directory containing the load-test logs
        #[arg(value_name = "DIR")]
        path: PathBuf,

        /// Directory for the summary file [default: <DIR>/summary]
        #[arg(short, long, env = "LOADSUM_OUT")]
        out: Option<PathBuf>,

        /// Format of the log lines
        #[arg(
            short,
            long,
            value_enum,
            default_value = "csv",
            env = "LOADSUM_INPUT_FORMAT"
        )]
        input_format: InputFormat,

        /// Ignore the first line of every file (CSV column header)
        #[arg(long)]
        skip_header: bool,

        /// Only summarize file names matching this glob (e.g. "*.jtl")
        #[arg(long)]
        pattern: Option<String>,

        /// Summarize files concurrently
        #[arg(long)]
        parallel: bool,

        /// Also write the extracted response times of each file
        #[arg(long)]
        dump_samples: bool,
    },

    /// Compare every https summary with its http counterpart
    Analyze {
        /// Directory containing summary files written by `generate`
        #[arg(value_name = "DIR")]
        path: PathBuf,

        /// Directory for the analysis file [default: <DIR>/analysis]
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Separator between name segments; the last segment is ignored when pairing
        #[arg(long, default_value = "-")]
        separator: char,

        /// Tag identifying candidate runs
        #[arg(long, default_value = "https")]
        candidate_tag: String,

        /// Tag identifying baseline runs
        #[arg(long, default_value = "http")]
        baseline_tag: String,

        /// File-type marker both identifiers must contain after the tag
        #[arg(long, default_value = "log")]
        suffix: String,
    },

    /// Compare two summary files directly
    Compare {
        /// Summary file of the baseline (http) run
        #[arg(long, value_name = "FILE")]
        baseline: PathBuf,

        /// Summary file of the candidate (https) run
        #[arg(long, value_name = "FILE")]
        candidate: PathBuf,
    },

    /// Generate shell completion scripts
    #[command(after_help = "SUPPORTED SHELLS: bash, zsh, fish, powershell, elvish\n\n\
                            INSTALLATION:\n  \
                            bash: loadsum completion --shell bash >> ~/.bashrc\n  \
                            zsh:  loadsum completion --shell zsh > ~/.zfunc/_loadsum")]
    Completion {
        /// Shell to generate completions for
        #[arg(long, value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Execute the command
    match cli.command {
        Commands::Generate {
            path,
            out,
            input_format,
            skip_header,
            pattern,
            parallel,
            dump_samples,
        } => {
            let options = GenerateOptions {
                format: input_format.into(),
                read: ReadOptions { skip_header },
                pattern,
                parallel,
                dump_samples,
            };
            commands::generate::execute(&path, out, &options, cli.format).map(|_| ())
        }
        Commands::Analyze {
            path,
            out,
            separator,
            candidate_tag,
            baseline_tag,
            suffix,
        } => {
            let rule = PairingRule {
                candidate_tag,
                baseline_tag,
                separator,
                suffix,
            };
            commands::analyze::execute(&path, out, &rule, cli.format).map(|_| ())
        }
        Commands::Compare {
            baseline,
            candidate,
        } => commands::compare::execute(&baseline, &candidate, cli.format),
        Commands::Completion { shell } => {
            commands::completion::execute(shell, &mut Cli::command())
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("loadsum=debug,loadsum_cli=debug,loadsum_core=debug")
    } else {
        EnvFilter::new("loadsum=info,loadsum_cli=info,loadsum_core=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}
