use thiserror::Error;

/// Failures surfaced by the legacy provider.
///
/// `UnrecognizedUri` and `Unsupported` are caller errors: the request can
/// never succeed and must not be retried.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Unrecognized URI:{0}")]
    UnrecognizedUri(String),

    #[error("{0}")]
    Unsupported(&'static str),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Row has {actual} values, cursor has {expected} columns")]
    ColumnMismatch { expected: usize, actual: usize },

    #[error("Store query failed: {0:#}")]
    Store(anyhow::Error),
}

impl From<anyhow::Error> for ProviderError {
    fn from(err: anyhow::Error) -> Self {
        ProviderError::Store(err)
    }
}
