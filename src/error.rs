use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackError {
    #[error("insufficient frames: need at least 2, got {0}")]
    InsufficientFrames(usize),

    #[error("length mismatch: `{name}` has {actual} samples, expected {expected}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("bad shape: `{name}` is {rows}x{cols}, expected Nx2")]
    BadShape {
        name: &'static str,
        rows: usize,
        cols: usize,
    },

    #[error("non-finite value in `{name}` at frame {index}")]
    NonFinite { name: &'static str, index: usize },

    #[error("value in `{name}` at frame {index} is not representable as f64")]
    Conversion { name: &'static str, index: usize },

    #[error("load failed: {0}")]
    Load(String),

    #[error("persist failed: {0}")]
    Persist(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("no tracks selected for batch")]
    NoTracks,

    #[error("invalid config: {0}")]
    Config(String),

    #[error("Io Error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Yaml Error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Json Error: {0}")]
    JsonError(#[from] serde_json::Error),
}
