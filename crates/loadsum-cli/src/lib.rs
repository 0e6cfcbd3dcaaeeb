use clap::ValueEnum;
use loadsum_core::sample::LogFormat;

pub mod commands;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
    Table,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Pretty => "pretty",
            OutputFormat::Json => "json",
            OutputFormat::Table => "table",
        }
    }
}

/// Layout of the load-test logs being summarized
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum InputFormat {
    /// JMeter CSV results (response time in the second column)
    Csv,
    /// JMeter XML results (response time in the `t` attribute)
    Xml,
}

impl From<InputFormat> for LogFormat {
    fn from(format: InputFormat) -> Self {
        match format {
            InputFormat::Csv => LogFormat::Csv,
            InputFormat::Xml => LogFormat::Xml,
        }
    }
}
