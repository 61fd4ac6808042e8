use thiserror::Error;

pub type Result<T> = std::result::Result<T, IbtracsError>;

#[derive(Error, Debug)]
pub enum IbtracsError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Date parsing error: {0}")]
    DateParse(#[from] chrono::ParseError),

    #[error("Download of {url} failed: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Required column '{0}' is missing from the track file")]
    MissingColumn(String),

    #[error("Line {line}: invalid timestamp '{value}'")]
    InvalidTimestamp { line: u64, value: String },

    #[error("Line {line}: ATCF id '{value}' is shorter than 4 characters")]
    InvalidAtcfId { line: u64, value: String },

    #[error("Line {line}: invalid {column} value '{value}'")]
    InvalidNumber {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("Invalid range: start {start} is after end {end}")]
    InvalidRange { start: String, end: String },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

impl IbtracsError {
    /// True for failures that leave no usable table behind.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            IbtracsError::Io(_)
                | IbtracsError::Csv(_)
                | IbtracsError::DateParse(_)
                | IbtracsError::Download { .. }
                | IbtracsError::MissingColumn(_)
                | IbtracsError::InvalidTimestamp { .. }
                | IbtracsError::InvalidAtcfId { .. }
                | IbtracsError::InvalidNumber { .. }
                | IbtracsError::InvalidFormat(_)
        )
    }
}
