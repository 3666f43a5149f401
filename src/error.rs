use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("damping factor must lie in (0, 1], got {0}")]
    InvalidDamping(f64),

    #[error("graph has no pages")]
    EmptyGraph,

    #[error("sample count must be positive")]
    ZeroSamples,

    #[error("tolerance must be positive and finite, got {0}")]
    InvalidTolerance(f64),

    #[error("iteration cap must be positive")]
    ZeroIterations,

    #[error("unknown page: {0}")]
    UnknownPage(String),

    #[error("invalid sampling weights: {0}")]
    Weights(String),

    #[error("failed to read corpus at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
