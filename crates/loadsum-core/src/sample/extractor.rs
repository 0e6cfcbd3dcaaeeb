use super::LogFormat;
use crate::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ELAPSED_ATTR: Regex = Regex::new(r#" t="([0-9]+)" "#).unwrap();
}

/// Pulls the response time out of a single log line
#[derive(Debug, Clone, Copy)]
pub struct SampleExtractor {
    format: LogFormat,
}

impl SampleExtractor {
    pub fn new(format: LogFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> LogFormat {
        self.format
    }

    /// Locate the response time field without interpreting it
    pub fn field<'a>(&self, line: &'a str) -> Result<&'a str> {
        match self.format {
            LogFormat::Csv => {
                let mut columns = line.splitn(3, ',');
                let _timestamp = columns.next();
                columns
                    .next()
                    .map(str::trim)
                    .ok_or_else(|| Error::MalformedRecord {
                        reason: "expected at least 2 comma-separated fields".to_string(),
                    })
            }
            LogFormat::Xml => ELAPSED_ATTR
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str())
                .ok_or_else(|| Error::MalformedRecord {
                    reason: "no t=\"<millis>\" attribute".to_string(),
                }),
        }
    }

    /// Extract and parse the response time of one line
    pub fn extract(&self, line: &str) -> Result<f64> {
        let field = self.field(line)?;
        parse_response_time(field)
    }
}

fn parse_response_time(field: &str) -> Result<f64> {
    match field.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(Error::InvalidNumber {
            value: field.to_string(),
        }),
    }
}
