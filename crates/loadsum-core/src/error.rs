use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse summary record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed record: {reason}")]
    MalformedRecord { reason: String },

    #[error("Invalid response time '{value}'")]
    InvalidNumber { value: String },

    #[error("Invalid response time '{value}' on line {line}")]
    InvalidNumberAt { line: usize, value: String },

    #[error("No baseline found for {candidate}")]
    PairNotFound { candidate: String },

    #[error("Baseline {measure} is zero, percent change is undefined")]
    DivisionByBaselineZero { measure: String },

    #[error("The {measure} of {identifier} is undefined (no samples)")]
    UndefinedMeasure { measure: String, identifier: String },

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
}

impl Error {
    /// Whether the error only affects a single line and the file can still be summarized
    pub fn is_recoverable_line_error(&self) -> bool {
        matches!(self, Error::MalformedRecord { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
