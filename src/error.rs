use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unable to read header row")]
    HeaderNotFound,

    #[error("Row at line {line} has {found} columns, header has {expected}")]
    ColumnCountMismatch {
        line: u64,
        expected: usize,
        found: usize,
    },
}
