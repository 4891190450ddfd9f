use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiagError {
    /// A row that could not be turned into a record. Recovered by skipping it.
    #[error("malformed {source_name} record at line {line}: {reason}")]
    MalformedRecord {
        source_name: &'static str,
        line: usize,
        reason: String,
    },

    #[error("empty dataset: no {0}")]
    EmptyDataset(DatasetKind),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to parse json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    Flights,
    Airports,
    Orders,
}

impl std::fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetKind::Flights => write!(f, "flights"),
            DatasetKind::Airports => write!(f, "airports"),
            DatasetKind::Orders => write!(f, "orders"),
        }
    }
}

pub type DiagResult<T> = Result<T, DiagError>;
