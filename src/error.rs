use thiserror::Error;

/// Crate-wide error type for load-time and batch-infrastructure failures.
///
/// A word the model cannot transduce is not an error; it surfaces as an
/// empty prediction (see `nbest`).
#[derive(Error, Debug)]
pub enum G2pError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("model line {line}: {reason}")]
    Model { line: usize, reason: String },

    #[error("phoneme map line {line}: expected two tab-separated columns")]
    MalformedMapping { line: usize },

    #[error("phoneme map: duplicate mapping for symbol {0:?}")]
    DuplicateMapping(String),

    #[error("worker pool error: {0}")]
    Pool(String),
}

pub type G2pResult<T> = Result<T, G2pError>;
