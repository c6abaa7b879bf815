use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::schema::Signal;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("data file not found: `{}`", .path.display())]
    #[diagnostic(help("ensure the CSV files are in the data/ folder"))]
    ResourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unknown scenario {0:?}")]
    UnknownScenario(String),
    #[error("duplicate scenario {0:?}")]
    DuplicateScenario(String),
    #[error("missing timestamp column `{0}`")]
    MissingTimestamp(&'static str),
    #[error("malformed timestamp {value:?} at row {row}")]
    MalformedTimestamp { row: usize, value: String },
    #[error("invalid value {value:?} in column `{column}` at row {row}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },
    #[error("column `{column}` has {actual} samples for {expected} timestamps")]
    ColumnLength {
        column: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("missing column `{column}` for {signal}")]
    #[diagnostic(help("the file exists but does not carry this mandatory signal"))]
    MissingColumn {
        signal: Signal,
        column: &'static str,
    },
    #[error("io {0}")]
    Io(#[from] std::io::Error),
    #[error("csv {0}")]
    Csv(#[from] csv::Error),
    #[error("toml parsing failed {0}")]
    Toml(#[from] toml::de::Error),
    #[error("json {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn missing(signal: Signal) -> Self {
        Error::MissingColumn {
            signal,
            column: signal.column(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::ResourceNotFound { .. })
    }
}
